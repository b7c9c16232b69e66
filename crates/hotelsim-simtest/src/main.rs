//! HotelSim Headless Simulation Harness
//!
//! Drives the booking engine on its simulated clock and checks the
//! allocation policy, the highlight/confirm lifecycle and the error paths.
//! Runs entirely in-process, no rendering and no real timers.
//!
//! Usage:
//!   cargo run -p hotelsim-simtest
//!   cargo run -p hotelsim-simtest -- --verbose --seed 7
//!   cargo run -p hotelsim-simtest -- --config hotel.json --json

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use hotelsim_core::availability;
use hotelsim_core::booking::PendingSelection;
use hotelsim_core::prelude::*;
use hotelsim_logic::allocator::{allocate, AllocationError, FreeRooms, SearchBudget, Strategy};
use hotelsim_logic::config::validate_config;
use hotelsim_logic::constants::{FLOOR_COUNT, TOTAL_ROOMS};
use hotelsim_logic::layout::{all_room_ids, floor_room_ids};
use hotelsim_logic::travel::{pairwise_travel, sequential_travel, TravelMetrics};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Seed used when neither `--seed` nor the config file provides one
const DEFAULT_SEED: u64 = 42;

/// Booking rounds in the randomized sweep
const SWEEP_ROUNDS: usize = 300;

#[derive(Parser)]
#[command(name = "hotelsim-simtest")]
#[command(about = "Headless validation of room allocation and the booking flow")]
struct Cli {
    /// Print every result, debug logs and the final floor grid
    #[arg(short, long)]
    verbose: bool,

    /// RNG seed for random fills (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// HotelConfig JSON file; defaults apply to missing fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final hotel state as JSON
    #[arg(long)]
    json: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

/// Final state printed by `--json`
#[derive(Serialize)]
struct Snapshot<'a> {
    seed: u64,
    now: f64,
    occupancy: OccupancySummary,
    pending: Option<&'a PendingSelection>,
    floors: Vec<FloorRow>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    println!("=== HotelSim Simulation Harness ===\n");

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let seed = *config.seed.get_or_insert(DEFAULT_SEED);
    tracing::info!(seed, "harness configured");

    let mut results = Vec::new();

    // 1. Configuration
    let config_results = validate_configuration(&config);
    let config_ok = config_results.iter().all(|r| r.passed);
    results.extend(config_results);

    let mut engine = HotelEngine::new(config.clone());
    if config_ok {
        // 2. Travel model
        results.extend(validate_travel_model());

        // 3. Allocation policy
        results.extend(validate_allocator());

        // 4. Booking lifecycle
        results.extend(validate_booking_flow(&config));

        // 5. Rejected commands
        results.extend(validate_errors(&config));

        // 6. Randomized sweep; its engine is the one reported below
        results.extend(validate_random_sweep(&mut engine));
    } else {
        println!("  (invalid configuration, remaining sections skipped)");
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || cli.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    if cli.verbose {
        println!();
        print_grid(&engine);
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if cli.json {
        let snapshot = Snapshot {
            seed,
            now: engine.now(),
            occupancy: engine.occupancy(),
            pending: engine.pending(),
            floors: engine.floor_rows(),
        };
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("error: could not serialize hotel state: {}", e),
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<HotelConfig, String> {
    let Some(path) = path else {
        return Ok(HotelConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("cannot parse {}: {}", path.display(), e))
}

/// Floors top-down: `.` empty, `*` highlighted, `#` booked
fn print_grid(engine: &HotelEngine) {
    for row in engine.floor_rows().iter().rev() {
        let cells: Vec<&str> = row
            .rooms
            .iter()
            .map(|(_, status)| match status {
                RoomStatus::Empty => ".",
                RoomStatus::Highlighted => "*",
                RoomStatus::Booked => "#",
            })
            .collect();
        println!("  F{:<2} | {}", row.floor, cells.join(" "));
    }
    let occ = engine.occupancy();
    println!(
        "  {} empty, {} highlighted, {} booked (t={})",
        occ.empty,
        occ.highlighted,
        occ.booked,
        engine.now()
    );
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(config: &HotelConfig) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let errors = validate_config(config);
    let detail = if errors.is_empty() {
        format!(
            "delay {}, fill {}..={}, budget {:?}",
            config.confirm_delay,
            config.random_fill.min,
            config.random_fill.max,
            config.search_budget
        )
    } else {
        errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    };
    vec![check("config_valid", errors.is_empty(), detail)]
}

// ── 2. Travel model ─────────────────────────────────────────────────────

fn validate_travel_model() -> Vec<TestResult> {
    println!("--- Travel Model ---");
    let mut results = Vec::new();

    let same_floor = pairwise_travel(101, 105);
    results.push(check(
        "travel_same_floor",
        same_floor == 4,
        format!("101↔105 = {} (expected 4)", same_floor),
    ));

    let cross_floor = pairwise_travel(105, 304);
    results.push(check(
        "travel_cross_floor",
        cross_floor == 13,
        format!("105↔304 = {} (expected 13)", cross_floor),
    ));

    let ids: Vec<RoomId> = all_room_ids().collect();
    let mut asymmetric = 0;
    let mut nonzero_diagonal = 0;
    for &a in &ids {
        if pairwise_travel(a, a) != 0 {
            nonzero_diagonal += 1;
        }
        for &b in &ids {
            if pairwise_travel(a, b) != pairwise_travel(b, a) {
                asymmetric += 1;
            }
        }
    }
    results.push(check(
        "travel_symmetric",
        asymmetric == 0 && nonzero_diagonal == 0,
        format!(
            "{} pairs, {} asymmetric, {} non-zero diagonal",
            ids.len() * ids.len(),
            asymmetric,
            nonzero_diagonal
        ),
    ));

    let path = sequential_travel(&[101, 102, 201]);
    results.push(check(
        "travel_sequential_return",
        path == 7,
        format!("[101, 102, 201] = {} (expected 7)", path),
    ));

    results
}

// ── 3. Allocation policy ────────────────────────────────────────────────

fn validate_allocator() -> Vec<TestResult> {
    println!("--- Allocation Policy ---");
    let mut results = Vec::new();
    let budget = SearchBudget::default();

    // Empty hotel: every size lands at the start of floor 1
    let empty = FreeRooms::from_sorted_ids(all_room_ids());
    let bad_sizes: Vec<usize> = (1..=5)
        .filter(|&k| match allocate(&empty, k, &budget) {
            Ok(a) => {
                let expected: Vec<RoomId> = (101..).take(k).collect();
                a.rooms != expected || a.strategy != Strategy::SingleFloor { floor: 1 }
            }
            Err(_) => true,
        })
        .collect();
    results.push(check(
        "alloc_empty_hotel_floor_one",
        bad_sizes.is_empty(),
        if bad_sizes.is_empty() {
            "sizes 1-5 all start at 101".to_string()
        } else {
            format!("wrong allocation for sizes {:?}", bad_sizes)
        },
    ));

    // 101,102,201 has edge travel 4, but floor 2 can hold all three (edge 9)
    let partial = FreeRooms::from_sorted_ids([101, 102, 201, 205, 210]);
    let cheaper = TravelMetrics::of(&[101, 102, 201]);
    let greedy = allocate(&partial, 3, &budget);
    results.push(check(
        "alloc_greedy_floor_first",
        matches!(
            &greedy,
            Ok(a) if a.rooms == [201, 205, 210] && cheaper < a.metrics
        ),
        format!(
            "{:?} chosen over cheaper {:?}",
            greedy.map(|a| (a.rooms, a.metrics)),
            cheaper
        ),
    ));

    let scattered = FreeRooms::from_sorted_ids([109, 110, 201, 202]);
    let fallback = allocate(&scattered, 3, &budget);
    results.push(check(
        "alloc_fallback_min_edge",
        matches!(&fallback, Ok(a) if a.rooms == [109, 110, 201] && a.metrics.edge_travel == 12),
        format!("{:?}", fallback.map(|a| (a.rooms, a.metrics))),
    ));

    let sparse = FreeRooms::from_sorted_ids([101, 202]);
    let short = allocate(&sparse, 3, &budget);
    results.push(check(
        "alloc_insufficient",
        short
            == Err(AllocationError::InsufficientRooms {
                requested: 3,
                available: 2,
            }),
        format!("{:?}", short.map(|a| a.rooms)),
    ));

    // Largest fallback: four free rooms per floor
    let worst = FreeRooms::from_sorted_ids(
        (1..=FLOOR_COUNT).flat_map(|floor| floor_room_ids(floor).take(4)),
    );
    let started = Instant::now();
    let search = allocate(&worst, 5, &budget);
    let elapsed = started.elapsed();
    results.push(check(
        "alloc_worst_case_within_budget",
        matches!(
            &search,
            Ok(a) if a.strategy == Strategy::Combinatorial { evaluated: 658_008 }
        ),
        format!("{:?} in {:?}", search.map(|a| a.strategy), elapsed),
    ));

    results
}

// ── 4. Booking lifecycle ────────────────────────────────────────────────

fn validate_booking_flow(config: &HotelConfig) -> Vec<TestResult> {
    println!("--- Booking Lifecycle ---");
    let mut results = Vec::new();
    let delay = config.confirm_delay;
    let mut engine = HotelEngine::new(config.clone());

    let fresh = engine.occupancy();
    results.push(check(
        "lifecycle_fresh_hotel",
        fresh.total == TOTAL_ROOMS && fresh.empty == TOTAL_ROOMS,
        format!("{} rooms, {} empty", fresh.total, fresh.empty),
    ));

    match engine.book(3) {
        Ok(outcome) => {
            let highlighted = engine.hotel().ids_with_status(RoomStatus::Highlighted);
            results.push(check(
                "lifecycle_highlight_on_book",
                highlighted == outcome.rooms,
                format!("highlighted {:?}, confirm at t={}", highlighted, outcome.confirm_at),
            ));

            let confirmed = engine.tick(delay);
            let booked = engine.hotel().ids_with_status(RoomStatus::Booked);
            results.push(check(
                "lifecycle_booked_after_delay",
                confirmed == outcome.rooms && booked == outcome.rooms && engine.pending().is_none(),
                format!("confirmed {:?} at t={}", confirmed, engine.now()),
            ));
        }
        Err(e) => results.push(check("lifecycle_highlight_on_book", false, e.to_string())),
    }

    // A second selection while one is pending confirms the first on the spot
    engine.reset();
    let first = engine.book(2);
    let second = engine.book(1);
    match (first, second) {
        (Ok(first), Ok(second)) => {
            let booked = engine.hotel().ids_with_status(RoomStatus::Booked);
            let highlighted = engine.hotel().ids_with_status(RoomStatus::Highlighted);
            let fired = engine.tick(delay);
            results.push(check(
                "lifecycle_force_confirm",
                booked == first.rooms && highlighted == second.rooms && fired == second.rooms,
                format!(
                    "booked {:?}, highlighted {:?}, then confirmed {:?}",
                    booked, highlighted, fired
                ),
            ));
        }
        (a, b) => results.push(check(
            "lifecycle_force_confirm",
            false,
            format!("{:?} / {:?}", a.map(|o| o.rooms), b.map(|o| o.rooms)),
        )),
    }

    engine.reset();
    let once = engine.hotel().clone();
    engine.reset();
    results.push(check(
        "lifecycle_reset_idempotent",
        engine.hotel() == &once && once == Hotel::new() && engine.pending().is_none(),
        format!("{} empty after two resets", engine.occupancy().empty),
    ));

    results
}

// ── 5. Rejected commands ────────────────────────────────────────────────

fn validate_errors(config: &HotelConfig) -> Vec<TestResult> {
    println!("--- Rejected Commands ---");
    let mut results = Vec::new();
    let mut engine = HotelEngine::new(config.clone());
    engine.random_fill();
    let before = engine.hotel().clone();

    let mut accepted = Vec::new();
    for n in [0, 6, -1] {
        if !matches!(engine.book(n), Err(BookingError::InvalidCount(_))) {
            accepted.push(n.to_string());
        }
    }
    for raw in ["x", "2.5", ""] {
        if !matches!(engine.book_input(raw), Err(BookingError::InvalidCount(_))) {
            accepted.push(format!("{:?}", raw));
        }
    }
    results.push(check(
        "errors_invalid_count",
        accepted.is_empty() && engine.hotel() == &before && engine.pending().is_none(),
        if accepted.is_empty() {
            "0, 6, -1, \"x\", \"2.5\", \"\" rejected without mutation".to_string()
        } else {
            format!("not rejected: {}", accepted.join(", "))
        },
    ));

    engine.random_fill_exact(TOTAL_ROOMS);
    let full = engine.book(1);
    results.push(check(
        "errors_full_hotel",
        matches!(
            full,
            Err(BookingError::InsufficientRooms {
                requested: 1,
                available: 0
            })
        ),
        format!("{:?}", full.map(|o| o.rooms)),
    ));

    results
}

// ── 6. Randomized sweep ─────────────────────────────────────────────────

fn validate_random_sweep(engine: &mut HotelEngine) -> Vec<TestResult> {
    println!("--- Randomized Sweep ({} rounds) ---", SWEEP_ROUNDS);
    let range = engine.config().random_fill;
    let delay = engine.config().confirm_delay;

    let mut bookings = 0;
    let mut fallbacks = 0;
    let mut rejected = 0;
    let mut timeouts = 0;
    let mut fills = 0;
    let mut resets = 0;
    let mut non_empty_picks = 0;
    let mut greedy_misses = 0;
    let mut fill_violations = 0;
    let mut unexpected = Vec::new();

    for round in 0..SWEEP_ROUNDS {
        if round % 25 == 0 {
            let free_before = engine.free_count();
            let filled = engine.random_fill();
            fills += 1;
            let expected_min = (range.min as usize).min(free_before);
            if filled.len() > free_before
                || filled.len() > range.max as usize
                || filled.len() < expected_min
            {
                fill_violations += 1;
            }
        }

        let count = round % 5 + 1;
        let before = engine.hotel().clone();
        let free = availability::snapshot(&before);
        let lowest_fit = (1..=FLOOR_COUNT).find(|&f| free.on_floor(f).len() >= count);

        match engine.book(count as i64) {
            Ok(outcome) => {
                bookings += 1;
                non_empty_picks += outcome
                    .rooms
                    .iter()
                    .filter(|&&id| before.status(id) != Some(RoomStatus::Empty))
                    .count();
                match (lowest_fit, outcome.strategy) {
                    (Some(floor), Strategy::SingleFloor { floor: got }) if floor == got => {}
                    (None, Strategy::Combinatorial { .. }) => fallbacks += 1,
                    _ => greedy_misses += 1,
                }
                engine.tick(delay);
            }
            Err(BookingError::InsufficientRooms { .. }) => {
                rejected += 1;
                if engine.hotel() != &before {
                    unexpected.push(format!("round {}: rejected booking mutated hotel", round));
                }
                engine.reset();
                resets += 1;
            }
            Err(BookingError::AllocationTimeout { .. }) => timeouts += 1,
            Err(e) => unexpected.push(format!("round {}: {}", round, e)),
        }
    }

    tracing::debug!(
        bookings,
        fallbacks,
        rejected,
        timeouts,
        fills,
        resets,
        "sweep finished"
    );

    vec![
        check(
            "sweep_only_empty_rooms",
            non_empty_picks == 0,
            format!("{} bookings, {} non-empty picks", bookings, non_empty_picks),
        ),
        check(
            "sweep_greedy_policy",
            greedy_misses == 0,
            format!(
                "{} fallbacks, {} greedy mismatches",
                fallbacks, greedy_misses
            ),
        ),
        check(
            "sweep_fill_bounds",
            fill_violations == 0,
            format!("{} fills within {}..={}", fills, range.min, range.max),
        ),
        check(
            "sweep_no_unexpected_errors",
            unexpected.is_empty(),
            if unexpected.is_empty() {
                format!(
                    "{} rejected, {} timeouts, {} resets",
                    rejected, timeouts, resets
                )
            } else {
                unexpected.join("; ")
            },
        ),
    ]
}
