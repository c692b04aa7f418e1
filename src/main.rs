// ==========================================
// 工单拣货清单系统 - 命令行入口
// ==========================================
// 用法:
//   pick-list generate [config.json]
//   pick-list lookup <WORKORDER_ID> [config.json]
// ==========================================

use pick_list::config::ConfigManager;
use pick_list::app::{WorkOrderLookup, WorkOrderNavigator};
use pick_list::{logging, PickListPipeline};
use std::path::PathBuf;

const USAGE: &str = "用法:
  pick-list generate [config.json]
  pick-list lookup <WORKORDER_ID> [config.json]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "generate".to_string());

    match command.as_str() {
        "generate" => {
            let config_path = args.next().map(PathBuf::from);
            let config = ConfigManager::load(config_path.as_deref())?;

            tracing::info!("{} v{}", pick_list::APP_NAME, pick_list::VERSION);
            let report = PickListPipeline::run(&config).await?;

            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "lookup" => {
            let work_order_id = args
                .next()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or(USAGE)?;
            let config_path = args.next().map(PathBuf::from);
            let config = ConfigManager::load(config_path.as_deref())?;

            let result = WorkOrderNavigator::lookup(&config, &work_order_id)?;
            match &result {
                WorkOrderLookup::WorkOrderNotFound { .. } => {
                    eprintln!("未找到工单: {}", work_order_id);
                }
                WorkOrderLookup::NoPickListData { .. } => {
                    eprintln!("工单 {} 无拣货数据", work_order_id);
                }
                WorkOrderLookup::Found { .. } => {}
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}
