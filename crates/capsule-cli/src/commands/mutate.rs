//! Mutating subcommands
//!
//! Usage: capsule create --json <FILE|->, capsule approve <ID>, ...

use std::io::Read;
use std::path::{Path, PathBuf};

use capsule_core::inputs::{
    AddBookmarkInput, ApproveInput, DisableInput, RecommendInput, UpdateInput, ViewInput,
};
use capsule_core::mapper;
use capsule_core::Outcome;
use clap::Args;
use serde::de::DeserializeOwned;

use super::context::Context;

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Args)]
pub struct JsonArgs {
    /// JSON input file, or `-` for stdin
    #[arg(long)]
    pub json: PathBuf,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    /// Capsule id
    pub id: String,
}

fn read_input<T: DeserializeOwned>(source: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let text = if source.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| format!("cannot read {}: {}", source.display(), e))?
    };
    Ok(serde_json::from_str(&text)?)
}

fn print_outcome(outcome: Outcome) -> CliResult {
    println!("{}", outcome.as_str());
    Ok(())
}

pub fn create(ctx: &Context, args: JsonArgs) -> CliResult {
    let input = read_input(&args.json)?;
    let id = ctx
        .service
        .create(mapper::build_create_command(input, &ctx.origin))?;
    println!("{}", id);
    Ok(())
}

pub fn update(ctx: &Context, args: JsonArgs) -> CliResult {
    let input: UpdateInput = read_input(&args.json)?;
    print_outcome(
        ctx.service
            .update(mapper::build_update_command(input, &ctx.origin))?,
    )
}

pub fn disable(ctx: &Context, args: IdArgs) -> CliResult {
    let input = DisableInput { capsule_id: args.id };
    print_outcome(
        ctx.service
            .disable(mapper::build_disable_command(input, &ctx.origin))?,
    )
}

pub fn approve(ctx: &Context, args: IdArgs) -> CliResult {
    let input = ApproveInput { capsule_id: args.id };
    print_outcome(
        ctx.service
            .approve(mapper::build_approve_command(input, &ctx.origin))?,
    )
}

pub fn view(ctx: &Context, args: IdArgs) -> CliResult {
    let input = ViewInput { capsule_id: args.id };
    print_outcome(
        ctx.service
            .view(mapper::build_view_command(input, &ctx.origin))?,
    )
}

pub fn bookmark(ctx: &Context, args: IdArgs) -> CliResult {
    let input = AddBookmarkInput { capsule_id: args.id };
    print_outcome(
        ctx.service
            .add_bookmark(mapper::build_add_bookmark_command(input, &ctx.origin))?,
    )
}

pub fn recommend(ctx: &Context, args: IdArgs) -> CliResult {
    let input = RecommendInput { capsule_id: args.id };
    print_outcome(
        ctx.service
            .recommend(mapper::build_recommend_command(input, &ctx.origin))?,
    )
}
