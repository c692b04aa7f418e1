// ==========================================
// 工单拣货清单系统 - 导入层
// ==========================================
// 职责: 外部表格 → 类型化领域记录
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod table_importer;
pub mod table_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, RawRow, RawTable, UniversalFileParser};
pub use table_importer::{ImportSummary, Imported, TableImporter, TableKind};

// 重导出 Trait 接口
pub use table_importer_trait::{FieldMapper, FileParser};
