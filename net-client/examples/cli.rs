use anyhow::{Context, Result};
use std::{env, fs, path::Path};

use analysis_state::{
    load_snapshot, project_cards, rank_skill_gaps, save_snapshot,
    AnalysisPayload, DashboardMetrics,
};
use kv_storage::{migrations::run_migrations, FileStorage};
use net_client::chat::fallback_reply;
use user_state::{
    directory::Registration, evaluate_gate, login, register,
    session::{current_username, is_signed_in, sign_in},
    logout, GateOutcome,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        println!("Usage:");
        println!(" cargo run --example cli <store> register <name> <username> <email> <password>");
        println!(" cargo run --example cli <store> login <email-or-username> <password>");
        println!(" cargo run --example cli <store> logout");
        println!(" cargo run --example cli <store> gate <path>");
        println!(" cargo run --example cli <store> analysis <payload.json>");
        println!(" cargo run --example cli <store> dashboard");
        println!(" cargo run --example cli <store> ask <message>");
        return Ok(());
    }

    let mut store = FileStorage::load_or_default(
        "cli".to_string(),
        Path::new(&args[1]),
    );
    run_migrations(&mut store).context("Failed to run migrations")?;

    match args[2].as_str() {
        "register" => register_command(&args, &mut store),
        "login" => login_command(&args, &mut store),
        "logout" => {
            logout(&mut store).context("Failed to clear session")?;
            println!("Signed out.");
            Ok(())
        }
        "gate" => gate_command(&args, &store),
        "analysis" => analysis_command(&args, &mut store),
        "dashboard" => dashboard_command(&store),
        "ask" => {
            let message = args.get(3).map(String::as_str).unwrap_or("");
            println!("{}", fallback_reply(message));
            Ok(())
        }
        other => {
            eprintln!("Invalid command '{}'.", other);
            Ok(())
        }
    }
}

fn register_command(args: &[String], store: &mut FileStorage) -> Result<()> {
    if args.len() < 7 {
        println!("Usage: cargo run --example cli <store> register <name> <username> <email> <password>");
        return Ok(());
    }
    let candidate = Registration {
        full_name: args[3].clone(),
        username: args[4].clone(),
        email: args[5].clone(),
        password: args[6].clone(),
        confirm_password: args[6].clone(),
    };
    match register(store, &candidate) {
        Ok(()) => println!("Registered {}. Please sign in.", args[4]),
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn login_command(args: &[String], store: &mut FileStorage) -> Result<()> {
    if args.len() < 5 {
        println!("Usage: cargo run --example cli <store> login <email-or-username> <password>");
        return Ok(());
    }
    match login(store, &args[3], &args[4]) {
        Ok(user) => {
            sign_in(store, &user).context("Failed to persist session")?;
            println!("Welcome {}", user.username);
        }
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn gate_command(args: &[String], store: &FileStorage) -> Result<()> {
    let path = args.get(3).map(String::as_str).unwrap_or("/");
    match evaluate_gate(is_signed_in(store), path) {
        GateOutcome::Proceed => println!("{}: proceed", path),
        GateOutcome::Redirect(redirect) => {
            println!("{}: redirect to {}", path, redirect.target())
        }
    }
    Ok(())
}

fn analysis_command(args: &[String], store: &mut FileStorage) -> Result<()> {
    if args.len() < 4 {
        println!(
            "Usage: cargo run --example cli <store> analysis <payload.json>"
        );
        return Ok(());
    }
    let username = match current_username(store) {
        Some(username) => username,
        None => {
            println!("Please sign in before uploading a resume.");
            return Ok(());
        }
    };

    let content =
        fs::read_to_string(&args[3]).context("Failed to read JSON file")?;
    let payload: AnalysisPayload =
        serde_json::from_str(&content).context("Failed to parse payload")?;
    save_snapshot(store, &username, &payload)
        .context("Failed to store snapshot")?;
    println!(
        "Stored analysis for {} ({} recommendations).",
        username,
        payload.recommendations.len()
    );
    Ok(())
}

fn dashboard_command(store: &FileStorage) -> Result<()> {
    let username = current_username(store).unwrap_or_default();
    let snapshot = if username.is_empty() {
        None
    } else {
        load_snapshot(store, &username)
    };

    let metrics = DashboardMetrics::project(snapshot.as_ref());
    println!("Resume score:    {}", metrics.resume_score);
    println!("Job matches:     {}", metrics.job_matches);
    println!("Skills mastered: {}", metrics.skills_mastered);
    println!("Semantic score:  {}", metrics.semantic_score);
    println!("Market score:    {}", metrics.market_score);
    println!("Weights:         {}", metrics.score_weights);
    println!("{}", metrics.freshness);

    if let Some(payload) = snapshot {
        for card in project_cards(&payload.recommendations) {
            println!(
                "- {} [{}%] {} ({})",
                card.title, card.score, card.company_label, card.skills_note
            );
        }
        for gap in rank_skill_gaps(&payload.recommendations) {
            println!("  missing {} ({}x)", gap.skill, gap.count);
        }
    }
    Ok(())
}
