// ==========================================
// 加柜分配引擎测试
// ==========================================
// 职责: 验证预算守恒、可选集合过滤、确定性输出与增益非负
// ==========================================

use swap_station_dss::{AddAllocator, AllocationProfile, StationRecord};

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建测试用站点记录
fn create_test_station(
    station_id: &str,
    unit_count: u32,
    throughput_per_unit: f64,
    demand_conversion: f64,
    unmet_demand_ratio: f64,
    distance_km: f64,
) -> StationRecord {
    StationRecord {
        station_id: station_id.to_string(),
        unit_count,
        throughput_per_unit,
        throughput_per_day_mean: throughput_per_unit * unit_count as f64,
        demand_conversion,
        unmet_demand_ratio,
        nearest_neighbor_distance_km: distance_km,
    }
}

/// 创建一张有区分度的测试特征表
fn create_test_table() -> Vec<StationRecord> {
    vec![
        create_test_station("ST001", 2, 42.0, 0.55, 1.8, 3.2),
        create_test_station("ST002", 5, 18.0, 0.30, 3.3, 0.9),
        create_test_station("ST003", 1, 51.0, 0.62, 1.6, 5.4),
        create_test_station("ST004", 7, 12.0, 0.21, 4.8, 0.4),
        create_test_station("ST005", 3, 28.0, 0.44, 2.3, 1.7),
    ]
}

// ==========================================
// 测试 1: 预算守恒
// ==========================================

#[test]
fn test_budget_conservation_across_budgets() {
    let stations = create_test_table();
    let allocator = AddAllocator::new();

    for budget in [1_u32, 3, 10, 25, 100] {
        let mut profile = AllocationProfile::default();
        profile.add_budget = budget;

        let plan = allocator.suggest(&stations, &profile).unwrap();
        assert_eq!(
            plan.allocated_units(),
            budget,
            "budget={} 时分配总数必须严格守恒",
            budget
        );
    }
}

// ==========================================
// 测试 2: 可选集合过滤
// ==========================================

#[test]
fn test_eligibility_excludes_full_stations() {
    let mut stations = create_test_table();
    // ST900 已达上限, 不得出现在方案中
    stations.push(create_test_station("ST900", 8, 60.0, 0.9, 1.2, 9.0));
    stations.push(create_test_station("ST901", 12, 55.0, 0.8, 1.3, 8.0));

    let plan = AddAllocator::new()
        .suggest(&stations, &AllocationProfile::default())
        .unwrap();

    assert!(plan
        .rows
        .iter()
        .all(|r| r.station_id != "ST900" && r.station_id != "ST901"));
    assert_eq!(plan.allocated_units(), 10);
}

#[test]
fn test_empty_eligible_set_returns_empty_plan() {
    // 所有站点均达上限 → 空方案而非错误
    let stations = vec![
        create_test_station("ST001", 8, 42.0, 0.55, 1.8, 3.2),
        create_test_station("ST002", 9, 18.0, 0.30, 3.3, 0.9),
    ];

    let plan = AddAllocator::new()
        .suggest(&stations, &AllocationProfile::default())
        .unwrap();

    assert!(plan.is_empty());
    assert_eq!(plan.allocated_units(), 0);
    assert!(!plan.notes.is_empty());
}

// ==========================================
// 测试 3: 输出次序与非负性
// ==========================================

#[test]
fn test_rows_sorted_descending_and_gains_non_negative() {
    let stations = create_test_table();
    let plan = AddAllocator::new()
        .suggest(&stations, &AllocationProfile::default())
        .unwrap();

    assert!(!plan.rows.is_empty());
    for window in plan.rows.windows(2) {
        assert!(
            window[0].units_to_add >= window[1].units_to_add,
            "建议行必须按 units_to_add 降序"
        );
    }
    for row in &plan.rows {
        assert!(row.units_to_add > 0); // 零建议行不输出
        assert!(row.projected_gain >= 0.0);
        assert!(row.projected_throughput_per_day >= row.throughput_per_day_mean);
    }
}

#[test]
fn test_aggregates_match_rows() {
    let stations = create_test_table();
    let plan = AddAllocator::new()
        .suggest(&stations, &AllocationProfile::default())
        .unwrap();

    let expected_total: f64 = plan.rows.iter().map(|r| r.projected_gain).sum();
    assert!((plan.total_gain - expected_total).abs() < 1e-9);
    assert!((plan.mean_gain - expected_total / plan.rows.len() as f64).abs() < 1e-9);
}

// ==========================================
// 测试 4: 幂等性（确定性平局裁决）
// ==========================================

#[test]
fn test_idempotence() {
    let stations = create_test_table();
    let profile = AllocationProfile::default();
    let allocator = AddAllocator::new();

    let first = allocator.suggest(&stations, &profile).unwrap();
    let second = allocator.suggest(&stations, &profile).unwrap();

    assert_eq!(first.rows, second.rows, "相同输入必须产出逐行一致的方案");
    assert_eq!(first.notes, second.notes);
    assert_eq!(first.total_gain, second.total_gain);
}

#[test]
fn test_idempotence_with_tied_stations() {
    // 两站特征完全一致, 平局裁决只能依赖 station_id
    let stations = vec![
        create_test_station("ST010", 3, 30.0, 0.5, 2.0, 2.0),
        create_test_station("ST002", 3, 30.0, 0.5, 2.0, 2.0),
        create_test_station("ST007", 5, 15.0, 0.3, 3.0, 1.0),
    ];
    let mut profile = AllocationProfile::default();
    profile.add_budget = 5;

    let allocator = AddAllocator::new();
    let first = allocator.suggest(&stations, &profile).unwrap();
    let second = allocator.suggest(&stations, &profile).unwrap();
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.allocated_units(), 5);
}

// ==========================================
// 测试 5: 配置校验
// ==========================================

#[test]
fn test_zero_budget_is_rejected() {
    let mut profile = AllocationProfile::default();
    profile.add_budget = 0;

    let result = AddAllocator::new().suggest(&create_test_table(), &profile);
    assert!(result.is_err());
}

#[test]
fn test_invalid_exponent_is_rejected() {
    let mut profile = AllocationProfile::default();
    profile.exponent = -1.0;

    let result = AddAllocator::new().suggest(&create_test_table(), &profile);
    assert!(result.is_err());
}
