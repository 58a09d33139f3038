use clap::Parser;
use hdrhistogram::Histogram;
use lottery_match::engine::matchlogic::plan_matches;
use lottery_match::MatchingInput;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of concurrent workers
    #[arg(short, long, default_value = "1")]
    concurrency: usize,

    /// Participants per matching request
    #[arg(short, long, default_value = "200")]
    participants: usize,

    /// Groups of recent history per request
    #[arg(short = 'r', long, default_value = "60")]
    recent: usize,

    /// Duration of the benchmark in seconds
    #[arg(short, long, default_value = "10")]
    duration: u64,
}

fn build_input(args: &Args, seed: u64) -> MatchingInput {
    let participant_ids: Vec<String> = (0..args.participants)
        .map(|i| format!("user-{}", i))
        .collect();
    let recent_matches = (0..args.recent)
        .map(|g| {
            (0..3)
                .map(|k| format!("user-{}", (g * 7 + k * 13) % args.participants.max(1)))
                .collect()
        })
        .collect();
    MatchingInput {
        participant_ids,
        group_size_min: 2,
        group_size_max: 3,
        recent_matches,
        seed: format!("bench-{}", seed),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Arc::new(Args::parse());
    let histogram = Arc::new(Mutex::new(Histogram::<u64>::new(3)?));
    let total_requests = Arc::new(Mutex::new(0u64));
    let fallbacks = Arc::new(Mutex::new(0u64));

    println!(
        "Starting benchmark with {} workers, {} participants, {} recent groups",
        args.concurrency, args.participants, args.recent
    );

    let deadline = Instant::now() + Duration::from_secs(args.duration);
    let mut handles = vec![];
    for worker in 0..args.concurrency {
        let args = args.clone();
        let histogram = histogram.clone();
        let total_requests = total_requests.clone();
        let fallbacks = fallbacks.clone();

        let handle = tokio::spawn(async move {
            let mut seed = worker as u64 * 1_000_000;
            while Instant::now() < deadline {
                let input = build_input(&args, seed);
                seed += 1;
                let start = Instant::now();
                let plan = tokio::task::spawn_blocking(move || plan_matches(&input)).await;
                let elapsed = start.elapsed().as_micros() as u64;
                let plan = match plan {
                    Ok(plan) => plan,
                    Err(e) => {
                        eprintln!("Worker {} failed: {}", worker, e);
                        return;
                    }
                };
                if let Err(e) = histogram.lock().await.record(elapsed) {
                    eprintln!("Failed to record latency: {}", e);
                }
                *total_requests.lock().await += 1;
                if plan.report.used_fallback {
                    *fallbacks.lock().await += 1;
                }
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.await?;
    }

    let total = *total_requests.lock().await;
    let hist = histogram.lock().await;

    println!("\nBenchmark Results:");
    println!("Total Requests: {}", total);
    println!("Average TPS: {:.2}", total as f64 / args.duration as f64);
    println!("Fallback Passes: {}", *fallbacks.lock().await);
    println!("\nLatency Distribution (microseconds):");
    println!("p50: {}", hist.value_at_percentile(50.0));
    println!("p90: {}", hist.value_at_percentile(90.0));
    println!("p95: {}", hist.value_at_percentile(95.0));
    println!("p99: {}", hist.value_at_percentile(99.0));
    println!("p99.9: {}", hist.value_at_percentile(99.9));

    Ok(())
}
