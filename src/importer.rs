// ==========================================
// 换电站电柜配置系统 - 特征表导入层
// ==========================================
// 依据: Allocation_Engine_Specs_v1.0.md - 外部接口
// ==========================================
// 职责: 从 ETL 协作方产出的 CSV 特征表加载 StationRecord
// 红线: 引擎假定输入已清洗,导入层是唯一的行级校验关卡;
//       非法行带行号报错,不做静默丢弃
// ==========================================

use crate::domain::StationRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

// ==========================================
// ImportError - 导入层错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("字段值错误 (line={line}, field={field}): {message}")]
    FieldValueError {
        line: u64,
        field: String,
        message: String,
    },

    #[error("特征表为空: 未解析到任何站点记录")]
    EmptyTable,

    #[error("站点标识重复: {station_id}")]
    DuplicateStationId { station_id: String },
}

// ==========================================
// StationTableImporter - 特征表导入器
// ==========================================
pub struct StationTableImporter;

impl StationTableImporter {
    /// 从 CSV 文件加载站点特征表
    ///
    /// # 参数
    /// - path: CSV 文件路径（首行为表头,字段名与 StationRecord 对齐）
    pub fn import_csv_path(path: &Path) -> Result<Vec<StationRecord>, ImportError> {
        let file = File::open(path)?;
        let records = Self::import_csv_reader(file)?;
        info!(
            path = %path.display(),
            station_count = records.len(),
            "站点特征表导入完成"
        );
        Ok(records)
    }

    /// 从任意 Reader 加载站点特征表
    ///
    /// # 规则
    /// 1. 每行反序列化为 StationRecord（负数电柜数在此处被类型拒绝）
    /// 2. 浮点字段必须有限且非负
    /// 3. station_id 不得重复
    /// 4. 空表报错（上游 ETL 契约保证至少一站）
    pub fn import_csv_reader<R: Read>(reader: R) -> Result<Vec<StationRecord>, ImportError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records: Vec<StationRecord> = Vec::new();
        let mut seen_ids: std::collections::HashSet<String> = std::collections::HashSet::new();

        for result in csv_reader.deserialize() {
            let record: StationRecord = result?;
            // 数据行从第 2 行开始（第 1 行为表头）
            let line = records.len() as u64 + 2;
            Self::validate_record(&record, line)?;

            if !seen_ids.insert(record.station_id.clone()) {
                return Err(ImportError::DuplicateStationId {
                    station_id: record.station_id,
                });
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(ImportError::EmptyTable);
        }
        Ok(records)
    }

    // ==========================================
    // 行级校验
    // ==========================================

    /// 校验单条记录的数值合法性
    fn validate_record(record: &StationRecord, line: u64) -> Result<(), ImportError> {
        if record.station_id.trim().is_empty() {
            return Err(ImportError::FieldValueError {
                line,
                field: "station_id".to_string(),
                message: "站点标识不得为空".to_string(),
            });
        }

        let float_fields = [
            ("throughput_per_unit", record.throughput_per_unit),
            ("throughput_per_day_mean", record.throughput_per_day_mean),
            ("demand_conversion", record.demand_conversion),
            ("unmet_demand_ratio", record.unmet_demand_ratio),
            (
                "nearest_neighbor_distance_km",
                record.nearest_neighbor_distance_km,
            ),
        ];
        for (field, value) in float_fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ImportError::FieldValueError {
                    line,
                    field: field.to_string(),
                    message: format!("必须为非负有限数, 实际为 {}", value),
                });
            }
        }

        Ok(())
    }
}
