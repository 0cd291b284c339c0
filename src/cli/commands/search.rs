//! Interactive search command
//!
//! Reads stdin line by line, treating each line as the current contents of a
//! search box, and prints whatever result sets the coalescer delivers.

use super::heroes::print_heroes;
use crate::api::{Hero, HeroService, ResultSet, ResultStream};
use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use log::debug;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{self, Instant};

/// Slack after the final term's window before deciding it settled silently
const SETTLE_GRACE: Duration = Duration::from_millis(50);

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Quiet time before a term is looked up (overrides config)
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

/// Drive the search pipeline from stdin
pub async fn handle_search(
    service: &HeroService,
    mut results: ResultStream<Hero>,
    settle_wait: Duration,
) -> Result<bool> {
    let input = BufReader::new(tokio::io::stdin());
    run_search(service, &mut results, input, settle_wait).await?;
    Ok(true)
}

/// Submit every input line as a search term and print delivered result sets
///
/// Returns after the input ends and the last submitted term has resolved:
/// either its result set arrives, or its window passes while the results
/// already shown are for that same term (a blank or repeated term issues no
/// lookup). `settle_wait` bounds how long to wait once the input has ended.
pub async fn run_search<R>(
    service: &HeroService,
    results: &mut ResultStream<Hero>,
    input: R,
    settle_wait: Duration,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut input_open = true;
    let mut last_submitted: Option<(String, Instant)> = None;
    let mut last_delivered: Option<String> = None;

    let quiet = time::sleep(Duration::ZERO);
    tokio::pin!(quiet);
    let mut quiet_armed = false;
    let deadline = time::sleep(settle_wait);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read search input")? {
                    Some(term) => {
                        last_submitted = Some((term.trim().to_string(), Instant::now()));
                        service.search(term);
                    }
                    None => {
                        input_open = false;
                        let Some((_, submitted_at)) = &last_submitted else {
                            debug!("Search input closed before any term was submitted");
                            break;
                        };
                        let settles_at = *submitted_at + service.search_window() + SETTLE_GRACE;
                        quiet.as_mut().reset(settles_at);
                        quiet_armed = true;
                        deadline.as_mut().reset(Instant::now() + settle_wait);
                        debug!("Search input closed, waiting for the last term to resolve");
                    }
                }
            }
            set = results.next() => match set {
                Some(set) => {
                    print_result_set(&set);
                    let resolved = !input_open && is_last_submitted(&last_submitted, &set.term);
                    last_delivered = Some(set.term);
                    if resolved {
                        break;
                    }
                }
                None => break,
            },
            () = &mut quiet, if quiet_armed => {
                quiet_armed = false;
                let shown = last_delivered.as_deref();
                if shown.is_some_and(|term| is_last_submitted(&last_submitted, term)) {
                    debug!("Last search term settled without a new lookup");
                    break;
                }
            }
            () = &mut deadline, if !input_open => {
                debug!("No results for the last search term within {:?}", settle_wait);
                break;
            }
        }
    }

    Ok(())
}

fn is_last_submitted(last_submitted: &Option<(String, Instant)>, term: &str) -> bool {
    last_submitted
        .as_ref()
        .is_some_and(|(submitted, _)| submitted == term)
}

fn print_result_set(set: &ResultSet<Hero>) {
    if set.term.is_empty() {
        println!("{}", "(cleared)".dimmed());
        return;
    }
    println!("{} {}", "search:".cyan().bold(), set.term);
    print_heroes(&set.items);
}
