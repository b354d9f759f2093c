// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, so stdout stays clean for --json)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the graph and exit with a proper code (0 = success, 2 = error)
// =============================================================================

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlArgs};
use link_cartographer::{parse_seed, CrawlGraph, CrawlStats, Crawler};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG overrides the default of info-level crawl progress
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("link_cartographer=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl(args) => handle_crawl(args).await,
        Commands::Load { file, json } => handle_load(&file, json),
    }
}

async fn handle_crawl(args: CrawlArgs) -> Result<i32> {
    let seed = parse_seed(&args.seed_url)?;
    let crawler = Crawler::new(args.to_config()).context("Failed to set up crawler")?;

    let report = crawler.crawl(&seed).await;

    if let Some(path) = &args.output {
        report
            .graph
            .save(path)
            .with_context(|| format!("Failed to save graph to {}", path.display()))?;
    }

    print_graph(&report.graph, args.json)?;
    if !args.json {
        print_stats(&report.stats);
    }

    Ok(0)
}

// Reloading never re-fetches pages or robots.txt
fn handle_load(file: &Path, json: bool) -> Result<i32> {
    let graph = CrawlGraph::load(file)
        .with_context(|| format!("Failed to load graph from {}", file.display()))?;

    print_graph(&graph, json)?;
    Ok(0)
}

fn print_graph(graph: &CrawlGraph, json: bool) -> Result<()> {
    if json {
        println!("{}", graph.to_json()?);
    } else {
        print_table(graph);
    }
    Ok(())
}

// Prints one row per node, visited pages and dangling targets alike
fn print_table(graph: &CrawlGraph) {
    println!("{:<70} {:>6} {:>6} {:>6}", "URL", "DEPTH", "IN", "OUT");
    println!("{}", "=".repeat(91));

    for (url, node) in graph.nodes() {
        let url_display = if url.chars().count() > 67 {
            format!("{}...", url.chars().take(67).collect::<String>())
        } else {
            url.to_string()
        };
        let depth = node
            .depth
            .map_or_else(|| "-".to_string(), |depth| depth.to_string());

        println!(
            "{:<70} {:>6} {:>6} {:>6}",
            url_display, depth, node.in_degree, node.out_degree
        );
    }

    println!();
    println!("📊 Graph:");
    println!("   📄 Pages visited: {}", graph.visited.len());
    println!("   🔗 Edges: {}", graph.edges.len());
    println!("   🪢 Dangling edges: {}", graph.dangling_edges().count());
}

fn print_stats(stats: &CrawlStats) {
    println!();
    println!("📈 Crawl:");
    println!("   ✅ Fetched: {}", stats.pages_fetched);
    println!("   ❌ Failed: {}", stats.failures.total());
    println!("   🤖 Rejected by robots.txt: {}", stats.robots_rejections);
    println!("   ⏱️  Duration: {:.2}s", stats.elapsed.as_secs_f64());
}
