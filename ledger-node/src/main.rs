//! goods-ledger 命令行入口
//!
//! ```text
//! goods-ledger <function> [args...]
//! goods-ledger issue '{"name":"Tea","price":10.5,"postage":1,"issuer":"acme","state":"new"}'
//! goods-ledger read goods:acmeCL
//! ```

use anyhow::Context;
use ledger_node::{Config, LedgerNode, init_logger_with_file};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let mut args = std::env::args().skip(1);
    let Some(function) = args.next() else {
        eprintln!("usage: goods-ledger <function> [args...]");
        std::process::exit(2);
    };
    let args: Vec<String> = args.collect();

    tracing::info!(
        work_dir = %config.work_dir,
        environment = %config.environment,
        "Goods ledger starting"
    );

    let node = LedgerNode::open(&config)
        .with_context(|| format!("failed to open world state at {}", config.db_path().display()))?;

    match node.execute(&function, &args) {
        Ok(Some(payload)) => println!("{}", String::from_utf8_lossy(&payload)),
        Ok(None) => {}
        Err(e) => {
            eprintln!("error {}: {}", e.code().code(), e);
            std::process::exit(1);
        }
    }
    Ok(())
}
