// UI layer: runs the `list` and `get` flows against an `ApiClient` and
// renders the results as a table, a detail sheet or pretty JSON.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use crossterm::tty::IsTty;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::warn;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::{ApiClient, ListOptions};
use crate::models::{Period, Recording, RecordingDetails};

pub const SHARE_BASE_URL: &str = "https://app.veo.co/matches";

/// Width taken by every column except TITLE: ID (36) + DURATION (8) +
/// CREATED (16) + padding.
const FIXED_COLUMNS_WIDTH: usize = 70;
const MIN_TITLE_WIDTH: usize = 30;
const MAX_TITLE_WIDTH: usize = 100;
const UNKNOWN_TERMINAL_TITLE_WIDTH: usize = 50;
const PIPED_TITLE_WIDTH: usize = 1000;

/// Spinner on stderr while a request is running. indicatif hides it when
/// stderr is not a terminal.
fn spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// `veo list`: fetch recordings and print them.
pub fn run_list(api: &ApiClient, club: &str, opts: ListOptions, json: bool) -> Result<()> {
    let pb = spinner("Fetching recordings...");
    let result = api.list_recordings(club, &opts);
    pb.finish_and_clear();
    let result = result.context("failed to list recordings")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, &result)?;
        return Ok(());
    }

    print_recordings_table(&mut out, &result.recordings, title_width(detect_terminal()))?;
    out.flush()?;

    let shown = result.recordings.len() as u64;
    if result.total_count > shown {
        eprintln!("\nShowing {} of {} recordings", shown, result.total_count);
    } else {
        eprintln!("\nTotal: {} recordings", shown);
    }
    Ok(())
}

/// `veo get`: resolve "latest" if asked, fetch details and periods, and
/// print them. A failure to fetch periods only drops the kickoff timestamp
/// from the share URL.
pub fn run_get(api: &ApiClient, recording: &str, club: Option<&str>, json: bool) -> Result<()> {
    let pb = spinner("Fetching recording...");
    let fetched = fetch_details(api, recording, club);
    pb.finish_and_clear();
    let (details, periods) = fetched?;
    let periods = periods_or_empty(periods);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, &details)?;
        return Ok(());
    }
    print_recording_details(&mut out, &details, &periods)?;
    Ok(())
}

/// Details plus the unlogged periods outcome. Warn only after the spinner
/// is cleared.
fn fetch_details(
    api: &ApiClient,
    recording: &str,
    club: Option<&str>,
) -> Result<(RecordingDetails, crate::error::Result<Vec<Period>>)> {
    let identifier = if recording == "latest" {
        let club = club.context(
            "--club flag or VEO_CLUB environment variable is required for 'latest'",
        )?;
        resolve_latest(api, club)?
    } else {
        recording.to_string()
    };

    let details = api
        .get_recording(&identifier)
        .context("failed to get recording")?;
    let periods = api.get_periods(&details.slug);
    Ok((details, periods))
}

/// Periods are enrichment only: on failure warn and carry on without them.
fn periods_or_empty(periods: crate::error::Result<Vec<Period>>) -> Vec<Period> {
    periods.unwrap_or_else(|e| {
        warn!("could not fetch periods: {e}");
        Vec::new()
    })
}

/// Identifier of the most recent recording: the first item of page 1.
pub fn resolve_latest(api: &ApiClient, club: &str) -> Result<String> {
    let result = api
        .list_recordings(club, &ListOptions::default())
        .context("failed to list recordings")?;
    match result.recordings.into_iter().next() {
        Some(first) => Ok(first.identifier),
        None => anyhow::bail!("no recordings found"),
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to encode JSON")?;
    writeln!(out)?;
    Ok(())
}

/// Print recordings as aligned columns: ID, TITLE, DURATION, CREATED.
pub fn print_recordings_table<W: Write>(
    out: &mut W,
    recordings: &[Recording],
    title_max: usize,
) -> io::Result<()> {
    let header = ["ID", "TITLE", "DURATION", "CREATED"];
    let mut rows: Vec<[String; 4]> = Vec::with_capacity(recordings.len() + 1);
    rows.push(header.map(String::from));
    for r in recordings {
        rows.push([
            r.identifier.clone(),
            truncate(&r.title, title_max),
            format_duration(r.duration),
            r.created
                .map(|c| c.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        ]);
    }

    let mut widths = [0usize; 4];
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.width());
        }
    }

    for row in &rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            line.push_str(cell);
            if i + 1 < row.len() {
                line.push_str(&" ".repeat(widths[i] - cell.width() + 2));
            }
        }
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Human-readable detail sheet for one recording.
pub fn print_recording_details<W: Write>(
    out: &mut W,
    d: &RecordingDetails,
    periods: &[Period],
) -> io::Result<()> {
    writeln!(out, "ID:          {}", d.identifier)?;
    writeln!(out, "Title:       {}", d.title)?;
    writeln!(out, "Type:        {}", d.kind.as_deref().unwrap_or(""))?;
    writeln!(out, "Start:       {}", format_local(d.start))?;
    writeln!(out, "End:         {}", format_local(d.end))?;
    writeln!(out, "Duration:    {}", format_duration(d.duration))?;

    if let Some(side) = present(&d.own_team_home_or_away) {
        writeln!(out, "\nTeam:        {}", side)?;
    }
    if let Some(color) = present(&d.own_team_color) {
        writeln!(out, "Own Color:   {}", color)?;
    }
    if let Some(formation) = present(&d.own_team_formation) {
        writeln!(out, "Formation:   {}", formation)?;
    }

    let opp_team = present(&d.opponent_team_name);
    let opp_club = present(&d.opponent_club_name);
    if opp_team.is_some() || opp_club.is_some() {
        write!(out, "\nOpponent:    {}", opp_team.unwrap_or(""))?;
        if let Some(club) = opp_club {
            if Some(club) != opp_team {
                write!(out, " ({})", club)?;
            }
        }
        writeln!(out)?;
    }
    if let Some(color) = present(&d.opponent_team_color) {
        writeln!(out, "Opp Color:   {}", color)?;
    }
    if let Some(short) = present(&d.opponent_short_name) {
        writeln!(out, "Opp Short:   {}", short)?;
    }
    if let Some(formation) = present(&d.opponent_team_formation) {
        writeln!(out, "Opp Form:    {}", formation)?;
    }

    if let Some(score) = d.score() {
        writeln!(
            out,
            "Score:       {:.0}-{:.0}",
            score.own.unwrap_or(0.0),
            score.opponent.unwrap_or(0.0)
        )?;
    }
    if let Some(age_group) = d.age_group() {
        writeln!(out, "Age Group:   {}", age_group)?;
    }

    writeln!(out, "\nSlug:        {}", d.slug)?;
    writeln!(out, "\nShare URL:   {}", share_url(&d.slug, periods))?;
    if let Some(reel) = present(&d.reel_url) {
        writeln!(out, "Highlights:  {}", reel)?;
    }
    Ok(())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn format_local(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S %Z").to_string())
        .unwrap_or_default()
}

/// Deep link to the match, jumping to kickoff when the first period's
/// start offset is known.
pub fn share_url(slug: &str, periods: &[Period]) -> String {
    match periods.first().and_then(Period::start_offset) {
        Some(kickoff) => format!("{}/{}/#t={}", SHARE_BASE_URL, slug, format_timestamp(kickoff)),
        None => format!("{}/{}/", SHARE_BASE_URL, slug),
    }
}

/// Seconds as `HH:MM:SS`.
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds / 60) % 60, seconds % 60)
}

/// Seconds as `MM:SS`, as used in share-URL fragments.
pub fn format_timestamp(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Shorten `s` to at most `max` columns, ending in "..." when there is
/// room for it.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let keep = if max <= 3 { max } else { max - 3 };
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > keep {
            break;
        }
        used += w;
        out.push(c);
    }
    if max > 3 {
        out.push_str("...");
    }
    out
}

/// What stdout is attached to, for sizing the title column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Piped,
    Unknown,
    Columns(usize),
}

pub fn detect_terminal() -> Terminal {
    if !io::stdout().is_tty() {
        return Terminal::Piped;
    }
    match crossterm::terminal::size() {
        Ok((cols, _)) => Terminal::Columns(cols as usize),
        Err(_) => Terminal::Unknown,
    }
}

/// Title column width for a given terminal. Piped output is never
/// truncated in practice.
pub fn title_width(terminal: Terminal) -> usize {
    match terminal {
        Terminal::Piped => PIPED_TITLE_WIDTH,
        Terminal::Unknown => UNKNOWN_TERMINAL_TITLE_WIDTH,
        Terminal::Columns(cols) => cols
            .saturating_sub(FIXED_COLUMNS_WIDTH)
            .clamp(MIN_TITLE_WIDTH, MAX_TITLE_WIDTH),
    }
}
