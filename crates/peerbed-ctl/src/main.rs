//! peerbed — command-line testbed harness for peer-to-peer daemons.

use anyhow::Result;

mod cmd;
mod registry;

fn print_usage() {
    println!("Usage: peerbed <command> [args]");
    println!();
    println!("Commands:");
    println!("  init [--count N] [--flavor F] [--binary B] [--port-base P]");
    println!("                       Allocate and bootstrap node directories");
    println!("  start [n] [-- a...]  Start one or all nodes and wait for readiness");
    println!("  stop [n]             Stop one or all nodes");
    println!("  restart [n]          Stop, then start again");
    println!("  status               Show per-node liveness, pid, and identity");
    println!("  run <n> -- <cmd...>  Run a command under node n's environment");
    println!("  attr <name> <n>      Read a node attribute (id|path|bw-in|bw-out)");
    println!("  shell <n>            Spawn $SHELL with the cluster environment");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();

    match argv.as_slice() {
        ["init", rest @ ..] => cmd::init::cmd_init(rest),
        ["start", rest @ ..] => cmd::lifecycle::cmd_start(rest).await,
        ["stop", rest @ ..] => cmd::lifecycle::cmd_stop(rest),
        ["restart", rest @ ..] => cmd::lifecycle::cmd_restart(rest).await,
        ["status"] => cmd::status::cmd_status(),
        ["run", rest @ ..] => cmd::run::cmd_run(rest),
        ["attr", rest @ ..] => cmd::attr::cmd_attr(rest).await,
        ["shell", rest @ ..] => cmd::shell::cmd_shell(rest),
        ["help"] | ["--help"] | ["-h"] | [] => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}
