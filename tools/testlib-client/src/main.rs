//! Command-line client that replays the testlib demo scenarios.
//!
//! Usage: `testlib-client [--library PATH] <vector|interface|sample|all>`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use testlib_ffi::{InterfaceObject, SampleObject, VectorD, LIBRARY_ENV};

/// Environment variable controlling the log filter.
const LOG_ENV: &str = "TESTLIB_LOG";

#[derive(Parser)]
#[command(name = "testlib-client", about = "Exercise the testlib shared library")]
struct Cli {
    /// Path to the testlib shared library (defaults to $TESTLIB_LIBRARY, then the platform name)
    #[arg(short, long, global = true)]
    library: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a vector, print it and its norm
    Vector,
    /// Create both interface implementations, rename and print them
    Interface,
    /// Create a named sample object and drive its counter
    Sample,
    /// Run every scenario
    All,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new("testlib_ffi=info,testlib_client=info"))
        .context("Failed to create log filter")?;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let loaded = match cli.library.as_deref() {
        Some(path) => testlib_ffi::testlib_init(path),
        None => testlib_ffi::ensure_testlib_init(),
    };
    loaded.with_context(|| format!("Failed to load testlib (set --library or {LIBRARY_ENV})"))?;

    match cli.command {
        Commands::Vector => run_vector(),
        Commands::Interface => run_interface(),
        Commands::Sample => run_sample(),
        Commands::All => {
            run_vector()?;
            run_sample()?;
            run_interface()
        }
    }
}

fn run_vector() -> Result<()> {
    println!("\n=== Vector ===> std::vector<double> through the C interface");

    let mut v1 = VectorD::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0])?;
    v1.set_name("v1");
    v1.disp()?;
    println!("norm(v1) = {}", v1.norm());

    let mut v2 = VectorD::from_value(2, 0.0)?;
    v2.set_name("v2");
    v2.set(0, 3.0)?;
    v2.set(1, 4.0)?;
    v2.disp()?;
    println!("norm(v2) = {}", v2.norm());

    info!("vector scenario done");
    Ok(())
}

fn run_sample() -> Result<()> {
    println!("\n=== Sample ===> Non-polymorphic class with C interface");

    let mut obj = SampleObject::with_name("[EXPERIMENT4]ClassHandle-OOP-C-API")?;
    obj.set(100);
    println!("obj.get()  = {}", obj.get());
    obj.set(200);
    println!("obj.get()  = {}", obj.get());

    info!("sample scenario done");
    Ok(())
}

fn run_interface() -> Result<()> {
    println!("\n=== Interface ===> Polymorphic classes from the shared library");

    let mut a = InterfaceObject::make_a()?;
    let mut b = InterfaceObject::make_b()?;
    println!("a.class_id() = {}", a.class_id()?);
    println!("b.class_id() = {}", b.class_id()?);

    a.set_name("ClassA-implA")?;
    b.set_name("ClassB-implB")?;
    println!("{a}");
    println!("{b}");

    drop(a);
    drop(b);
    info!("interface scenario done");
    Ok(())
}
