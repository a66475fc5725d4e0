//! 提取管线：加载一次 → 逐族提取 → 逐族写盘
//!
//! 单线程线性流程即可，成本由图纸规模决定。除加载失败外不允许任何
//! 错误中止全局：单个产物失败记入报告，其余产物照常尝试。

use std::path::PathBuf;

use tracing::{error, info};

use crate::artifact;
use crate::error::DumpError;
use crate::extract;
use crate::limit::RecordLimit;
use crate::loader::DrawingSource;

/// 一次运行的输入
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub limit: RecordLimit,
}

/// 单个产物的结果
#[derive(Debug)]
pub struct ArtifactOutcome {
    pub name: &'static str,
    pub records: usize,
    pub error: Option<DumpError>,
}

/// 全部产物的结果汇总
#[derive(Debug, Default)]
pub struct DumpReport {
    pub outcomes: Vec<ArtifactOutcome>,
}

impl DumpReport {
    fn push(&mut self, name: &'static str, records: usize, result: Result<(), DumpError>) {
        let error = match result {
            Ok(()) => None,
            Err(e) => {
                error!("{e}");
                Some(e)
            }
        };
        self.outcomes.push(ArtifactOutcome {
            name,
            records,
            error,
        });
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_some()).count()
    }

    pub fn total_records(&self) -> usize {
        self.outcomes.iter().map(|o| o.records).sum()
    }
}

/// 运行整条管线；只有文档加载失败会返回 Err
pub fn run(options: &DumpOptions) -> Result<DumpReport, DumpError> {
    let source = DrawingSource::open(&options.input)?;
    let limit = options.limit;
    let out = options.out_dir.as_path();

    let mut report = DumpReport::default();

    let meta = extract::meta(&source);
    report.push(artifact::META, 1, artifact::write(out, artifact::META, &meta));

    let layers = extract::layers(&source, limit);
    report.push(
        artifact::LAYERS,
        layers.len(),
        artifact::write(out, artifact::LAYERS, &layers),
    );

    let blocks = extract::blocks(&source, limit);
    report.push(
        artifact::BLOCKS,
        blocks.len(),
        artifact::write(out, artifact::BLOCKS, &blocks),
    );

    let inserts = extract::inserts(&source, limit);
    report.push(
        artifact::INSERTS,
        inserts.len(),
        artifact::write(out, artifact::INSERTS, &inserts),
    );

    let lwpolylines = extract::lwpolylines(&source, limit);
    report.push(
        artifact::LWPOLYLINES,
        lwpolylines.len(),
        artifact::write(out, artifact::LWPOLYLINES, &lwpolylines),
    );

    let polylines = extract::polylines(&source, limit);
    report.push(
        artifact::POLYLINES,
        polylines.len(),
        artifact::write(out, artifact::POLYLINES, &polylines),
    );

    let lines = extract::lines(&source, limit);
    report.push(
        artifact::LINES,
        lines.len(),
        artifact::write(out, artifact::LINES, &lines),
    );

    let arcs = extract::arcs(&source, limit);
    report.push(
        artifact::ARCS,
        arcs.len(),
        artifact::write(out, artifact::ARCS, &arcs),
    );

    let circles = extract::circles(&source, limit);
    report.push(
        artifact::CIRCLES,
        circles.len(),
        artifact::write(out, artifact::CIRCLES, &circles),
    );

    let texts = extract::texts(&source, limit);
    report.push(
        artifact::TEXTS,
        texts.len(),
        artifact::write(out, artifact::TEXTS, &texts),
    );

    let mtexts = extract::mtexts(&source, limit);
    report.push(
        artifact::MTEXTS,
        mtexts.len(),
        artifact::write(out, artifact::MTEXTS, &mtexts),
    );

    let dimensions = extract::dimensions(&source, limit);
    report.push(
        artifact::DIMENSIONS,
        dimensions.len(),
        artifact::write(out, artifact::DIMENSIONS, &dimensions),
    );

    info!(
        "Extracted {} records into {} artifacts ({} failed)",
        report.total_records(),
        report.outcomes.len(),
        report.failed()
    );
    Ok(report)
}
