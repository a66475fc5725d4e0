//! dxfdump 命令行入口
//!
//! 解析 DXF，按实体族导出基础结构为 JSON，便于后续分析。
//! 仅文档加载失败或有产物写失败时以非零码退出。

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use dxfdump_core::{pipeline, DumpOptions, RecordLimit};

/// 解析 DXF，导出基础结构为 JSON
#[derive(Parser, Debug)]
#[command(name = "dxfdump", version, about)]
struct Args {
    /// DXF 文件路径（DWG 请先转为 DXF，如 2010 ASCII DXF）
    dxf: PathBuf,

    /// 输出目录（不存在时递归创建）
    #[arg(long, default_value = "dxf_dump")]
    outdir: PathBuf,

    /// 每类实体最多导出条数；0 表示不限制（大图慎用）
    #[arg(long, default_value_t = 5000)]
    limit: usize,
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    let args = Args::parse();
    let options = DumpOptions {
        input: args.dxf,
        out_dir: args.outdir,
        limit: RecordLimit::new(args.limit),
    };

    let report = pipeline::run(&options)?;
    if report.failed() > 0 {
        bail!("{} artifact(s) failed to write", report.failed());
    }

    let shown = std::fs::canonicalize(&options.out_dir).unwrap_or_else(|_| options.out_dir.clone());
    println!("DXF parsed. JSON files saved to: {}", shown.display());
    Ok(())
}
