//! Read-only subcommands; all output is JSON on stdout

use clap::Args;
use serde::Serialize;

use super::context::Context;
use super::mutate::IdArgs;

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Args)]
pub struct FeedArgs {
    /// Topic codes, in feed order
    #[arg(required = true)]
    pub topics: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TopicArgs {
    /// Topic code
    pub code: String,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn get(ctx: &Context, args: IdArgs) -> CliResult {
    match ctx.service.find_by(&args.id)? {
        Some(capsule) => print_json(&capsule),
        None => {
            println!("not found");
            Ok(())
        }
    }
}

pub fn list(ctx: &Context) -> CliResult {
    print_json(&ctx.service.find_all()?)
}

pub fn count(ctx: &Context) -> CliResult {
    println!("{}", ctx.service.get_all_capsules_count()?);
    Ok(())
}

pub fn feed(ctx: &Context, args: FeedArgs) -> CliResult {
    print_json(&ctx.service.get_my_feed(&args.topics)?)
}

pub fn topic(ctx: &Context, args: TopicArgs) -> CliResult {
    print_json(&ctx.service.find_by_topic(&args.code)?)
}

pub fn pending(ctx: &Context) -> CliResult {
    print_json(&ctx.service.get_pending_approval()?)
}

pub fn metadata(ctx: &Context) -> CliResult {
    print_json(&ctx.service.get_metadata())
}
