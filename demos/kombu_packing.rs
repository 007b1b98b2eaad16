//! # 昆布裝袋計算範例
//!
//! 使用內建範例庫存（6.0g〜7.9g，共 225 枚）計算最佳裝袋組合。
//!
//! ```text
//! cargo run --example kombu_packing -- [目標下限] [目標上限] [每袋枚數]
//! RUST_LOG=kombu=debug cargo run --example kombu_packing
//! ```
//!
//! 未指定參數時使用預設設定（40.0〜43.0g，每袋 6 枚），約產生十一萬種組合模式，
//! 由 HiGHS 求解。

use anyhow::Context;
use kombu::{Inventory, PackingConfig, PackingPipeline, DEFAULT_SOLVER};
use kombu_core::sample::sample_records;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = parse_config(std::env::args().skip(1).collect())?;

    println!("🥬 ===== 昆布裝袋組合優化 =====");
    println!();

    // ========== 1. 載入庫存 ==========
    println!("📦 步驟 1: 載入範例庫存");
    let inventory = Inventory::from_records(&sample_records())?;
    println!(
        "   重量 {} 種，合計庫存 {} 枚",
        inventory.len(),
        inventory.total_stock()
    );
    println!();

    // ========== 2. 計算 ==========
    println!(
        "🔄 步驟 2: 計算（每袋 {} 枚，{}〜{}g，求解器 {}）",
        config.pieces_per_bag, config.target_min, config.target_max, DEFAULT_SOLVER
    );
    let pipeline = PackingPipeline::with_solver(config, DEFAULT_SOLVER)?;
    let plan = pipeline.run(&inventory).context("裝袋計算失敗")?;
    println!("   有效組合模式 {} 種", plan.patterns.len());
    println!();

    // ========== 3. 組合結果 ==========
    println!("📋 步驟 3: 組合結果");
    for row in &plan.report.rows {
        let weights: Vec<String> = row.weights.iter().map(|w| w.to_string()).collect();
        println!(
            "   [{}]  {} 袋  合計 {}g",
            weights.join(", "),
            row.bags,
            row.total_weight
        );
    }
    println!("   ───────────────");
    println!("   🎉 合計 {} 袋，使用 {} 枚", plan.total_bags(), plan.report.total_pieces_used);
    println!();

    // ========== 4. 使用後庫存 ==========
    println!("📊 步驟 4: 使用後庫存");
    println!("   重量    庫存  使用  剩餘");
    for usage in &plan.report.inventory {
        println!(
            "   {:>5}  {:>4}  {:>4}  {:>4}",
            usage.weight, usage.stock, usage.used, usage.remaining
        );
    }

    for warning in &plan.report.warnings {
        println!("   ⚠ {}", warning.message);
    }
    plan.report.verify()?;

    Ok(())
}

fn parse_config(args: Vec<String>) -> anyhow::Result<PackingConfig> {
    let mut config = PackingConfig::default();

    if let [min, max, rest @ ..] = args.as_slice() {
        let min: Decimal = min.parse().with_context(|| format!("目標下限無效: {}", min))?;
        let max: Decimal = max.parse().with_context(|| format!("目標上限無效: {}", max))?;
        config = config.with_target_window(min, max);

        if let Some(pieces) = rest.first() {
            let pieces: u32 = pieces
                .parse()
                .with_context(|| format!("每袋枚數無效: {}", pieces))?;
            config = config.with_pieces_per_bag(pieces);
        }
    }

    config.validate()?;
    Ok(config)
}
