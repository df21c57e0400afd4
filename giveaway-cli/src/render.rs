use giveaway_core::{GiveawayDetail, SavedEntry, ViewRow, WorthSummary};

const RESET: &str = "\x1b[0m";

fn title_style(is_dark: bool) -> &'static str {
    if is_dark {
        "\x1b[1;97m"
    } else {
        "\x1b[1;30m"
    }
}

pub fn rows(rows: &[ViewRow<'_>], is_dark: bool) {
    if rows.is_empty() {
        println!("No giveaways found. Try adjusting your filters or search terms.");
        return;
    }
    let style = title_style(is_dark);
    for row in rows {
        let summary = row.summary;
        let marker = if row.is_saved { "*" } else { " " };
        let ends = summary
            .end_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "open".to_owned());
        println!(
            "{marker} {:>6}  {style}{}{RESET}  [{}]  {}  ends {}",
            summary.id.0,
            summary.title,
            summary.platforms.join(", "),
            summary.worth,
            ends
        );
    }
}

pub fn detail(detail: &GiveawayDetail, is_saved: bool) {
    let summary = &detail.summary;
    println!("{} ({})", summary.title, summary.id);
    println!("  type:      {}", summary.kind);
    println!("  platforms: {}", summary.platforms.join(", "));
    println!("  worth:     {}", summary.worth);
    if let Some(end) = summary.end_date {
        println!("  ends:      {end}");
    }
    if let Some(users) = detail.users {
        println!("  users:     {users}");
    }
    println!("  saved:     {}", if is_saved { "yes" } else { "no" });
    println!();
    println!("{}", detail.description);
    println!();
    println!("How to claim:");
    println!("{}", detail.instructions);
    println!();
    println!("Claim at {}", detail.claim_url);
}

pub fn worth(worth: &WorthSummary) {
    println!(
        "${:.2} across {} active giveaways",
        worth.total_usd, worth.active_count
    );
}

pub fn saved(entries: &[SavedEntry]) {
    if entries.is_empty() {
        println!("No saved giveaways yet.");
        return;
    }
    for entry in entries {
        println!(
            "{:>6}  {}  [{}]  {}  saved {}",
            entry.id.0,
            entry.title,
            entry.platforms.join(", "),
            entry.worth,
            entry.saved_at.format("%Y-%m-%d")
        );
    }
}
