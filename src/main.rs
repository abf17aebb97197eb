// ==========================================
// 换电站电柜配置系统 - 命令行入口
// ==========================================
// 用法: swap-station-dss <stations.csv> [profile.json]
// 输出: 加/减柜建议方案的 JSON 表,供看板协作方消费
// ==========================================

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::Path;
use swap_station_dss::{
    logging, AllocationEngine, AllocationPlan, AllocationProfile, RemovalPlan,
    StationTableImporter,
};
use tracing::info;

/// 供看板消费的组合输出
#[derive(Serialize)]
struct SuggestionReport {
    allocation: AllocationPlan,
    removal: RemovalPlan,
}

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("用法: {} <stations.csv> [profile.json]", args[0]);
    }

    // 加载特征表
    let stations = StationTableImporter::import_csv_path(Path::new(&args[1]))
        .context("站点特征表导入失败")?;

    // 加载策略配置（缺省使用默认配置）
    let profile = match args.get(2) {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("配置文件读取失败: {}", path))?;
            serde_json::from_str::<AllocationProfile>(&text).context("配置文件解析失败")?
        }
        None => AllocationProfile::default(),
    };

    info!(
        station_count = stations.len(),
        add_budget = profile.add_budget,
        remove_budget = profile.remove_budget,
        "开始生成配置建议"
    );

    let engine = AllocationEngine::new();
    let (allocation, removal) = engine.suggest_both(&stations, &profile)?;

    let report = SuggestionReport {
        allocation,
        removal,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
