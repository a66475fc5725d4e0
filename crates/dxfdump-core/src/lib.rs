//! DXF 结构化事实提取
//!
//! 把一张 DXF 图纸展平为一组归一化、可序列化的记录——只导出
//! “原始事实”，不做几何解释：文档元信息、图层、块定义、
//! 块引用(INSERT)、多段线(LWPOLYLINE/POLYLINE)、直线、圆弧、圆、
//! 文字(TEXT/MTEXT)、标注(DIMENSION)，每族一个 JSON 产物。
//!
//! 容错约定：
//! - 单个字段读不出 → 该字段落盘为 null，记录本身保留；
//! - 单个实体无法构造最小身份 → 仅丢弃该实体，同族其余不受影响；
//! - 只有文档加载失败会中止整个运行，单个产物写失败只影响该产物。

pub mod artifact;
pub mod error;
pub mod extract;
pub mod flags;
pub mod kind;
pub mod limit;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod value;

pub use error::{DumpError, RecordError};
pub use limit::RecordLimit;
pub use loader::DrawingSource;
pub use pipeline::{run, DumpOptions, DumpReport};
pub use value::TriState;
