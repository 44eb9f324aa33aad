// SOR Simulator CLI
// Demo driver standing in for the excluded UI layer: ticks the market,
// routes one order, and steps through the plan in priority order.

use clap::{Parser, Subcommand};
use sor_simulator::{Config, MarketEngine, Order, OrderSide};
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "sor-sim")]
#[command(version = "0.2.0")]
#[command(about = "Multi-venue order book and smart-order-router simulator", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// List the configured venues
    Venues,

    /// Tick the market, route an order, and replay the plan
    Run {
        /// Market ticks to simulate before routing
        #[arg(short, long, default_value = "10")]
        ticks: u64,

        /// Order quantity in shares
        #[arg(short, long, default_value = "5000")]
        quantity: u64,

        /// Order side: bid (buy) or ask (sell)
        #[arg(short, long, default_value = "bid")]
        side: String,

        /// Optional limit price; omit for a market order
        #[arg(short, long)]
        limit: Option<f64>,

        /// Pause between replayed decisions, for display pacing
        #[arg(long, default_value = "0")]
        step_ms: u64,

        /// Print the routing plan as JSON instead of text
        #[arg(long)]
        json: bool,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init => {
            let config = Config::default();
            config.to_file(&cli.config)?;
            info!("📁 Wrote default config to {}", cli.config);
            Ok(())
        }

        Commands::Venues => {
            let config = Config::load_or_create(&cli.config)?;
            let engine = MarketEngine::new(config);
            for venue in engine.registry().venues() {
                println!(
                    "{:<6} {:<26} maker {:>8.4} taker {:>7.4} latency {:>4}ms {}",
                    venue.id,
                    venue.name,
                    venue.maker_fee,
                    venue.taker_fee,
                    venue.latency_ms,
                    if venue.active { "active" } else { "inactive" }
                );
            }
            Ok(())
        }

        Commands::Run {
            ticks,
            quantity,
            side,
            limit,
            step_ms,
            json,
            seed,
        } => {
            let config = Config::load_or_create(&cli.config)?;
            let symbol = config.simulation.symbol.clone();

            let mut engine = match seed {
                Some(seed) => MarketEngine::with_seed(config, seed),
                None => MarketEngine::new(config),
            };

            for _ in 0..ticks {
                engine.tick();
            }

            let side = match side.to_lowercase().as_str() {
                "bid" | "buy" => OrderSide::Bid,
                "ask" | "sell" => OrderSide::Ask,
                other => return Err(format!("unknown side: {}", other).into()),
            };

            let order = match limit {
                Some(price) => Order::limit(&symbol, side, quantity, price),
                None => Order::market(&symbol, side, quantity),
            };

            let view = engine.consolidated_book();
            info!(
                "Consolidated NBBO after {} ticks: bid {:?} / ask {:?}",
                ticks,
                view.best_bid(),
                view.best_ask()
            );

            let (plan, details) = engine.submit_order(&order)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                return Ok(());
            }

            println!(
                "Routing plan for {} {:?} {} ({:?}):",
                symbol, side, quantity, plan.strategy
            );
            println!(
                "  filled {}/{} @ avg {:.4}, est cost {:.2}, slippage {:.4}",
                plan.total_quantity,
                order.quantity,
                plan.estimated_avg_price,
                plan.estimated_total_cost,
                plan.estimated_slippage
            );

            // Decisions must be consumed in ascending priority: the order
            // encodes economic execution priority
            for (decision, detail) in plan.decisions.iter().zip(&details) {
                println!(
                    "  [{}] {} x {} @ {:.2} (fees {:.4}): {}",
                    decision.priority,
                    decision.venue_id,
                    decision.quantity,
                    decision.expected_price,
                    decision.expected_fees,
                    decision.rationale
                );
                for fill in &detail.fills {
                    println!(
                        "        level {:.2}: took {} ({:.1}%), {} left",
                        fill.price,
                        fill.quantity_taken,
                        fill.percentage_taken,
                        fill.quantity_remaining
                    );
                }
                if step_ms > 0 {
                    std::thread::sleep(Duration::from_millis(step_ms));
                }
            }

            Ok(())
        }
    }
}
