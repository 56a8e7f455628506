use directory_core::{CardView, DetailView, DirectoryViewModel, ExperiencesView, FilterSet};

const RULE: &str = "----------------------------------------";

/// Text lines for one frame of the directory view.
pub fn render(view: &DirectoryViewModel) -> Vec<String> {
    let mut lines = vec![RULE.to_string(), header(&view.filters, view.window_size)];

    if view.loading {
        lines.push("Loading...".to_string());
    }

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
        lines.push("(type `dismiss` to close, `refresh` to retry)".to_string());
    } else {
        for (index, card) in view.cards.iter().enumerate() {
            render_card(&mut lines, index + 1, card);
        }
        if view.show_empty_notice {
            lines.push("No professionals found".to_string());
        }
        if view.show_end_notice {
            lines.push("No more professionals to load".to_string());
        } else if view.has_more && !view.loading {
            lines.push(format!(
                "{} shown; type `more` to load more",
                view.cards.len()
            ));
        }
    }

    if let Some(detail) = &view.detail {
        render_detail(&mut lines, detail);
    }
    lines
}

fn header(filters: &FilterSet, window_size: usize) -> String {
    let value = |field: &Option<String>| field.clone().unwrap_or_else(|| "-".to_string());
    format!(
        "company: {} | job: {} | person: {} | window: {}",
        value(&filters.company_query),
        value(&filters.job_query),
        value(&filters.person_id),
        window_size
    )
}

fn render_card(lines: &mut Vec<String>, position: usize, card: &CardView) {
    lines.push(format!(
        "{position:>3}. {} [{}]  {}",
        display_name(&card.name),
        card.member_id,
        card.score
    ));
    lines.push(format!("     {}", card.headline));
    lines.push(format!("     {}", card.location));
    for line in &card.bio_lines {
        lines.push(format!("     {line}"));
    }
}

fn render_detail(lines: &mut Vec<String>, detail: &DetailView) {
    lines.push(RULE.to_string());
    lines.push(format!(
        "{} [{}]  {}",
        display_name(&detail.name),
        detail.member_id,
        detail.score
    ));
    if let Some(headline) = &detail.headline {
        lines.push(headline.clone());
    }
    lines.push(detail.location.clone());
    if let Some(url) = &detail.linkedin_url {
        lines.push(format!("LinkedIn: {url}"));
    }
    lines.push(String::new());
    lines.push("About".to_string());
    for line in &detail.bio_lines {
        lines.push(format!("  {line}"));
    }
    lines.push(String::new());
    lines.push("Experience".to_string());
    match &detail.experiences {
        ExperiencesView::Loading => lines.push("  Loading experiences...".to_string()),
        ExperiencesView::Failed(message) => lines.push(format!("  Error: {message}")),
        ExperiencesView::Empty => lines.push("  No experience information available".to_string()),
        ExperiencesView::Entries(rows) => {
            for row in rows {
                lines.push(format!("  {} at {}", row.title, row.company));
                if let Some(range) = &row.date_range {
                    lines.push(format!("    {range}"));
                }
                for line in &row.description_lines {
                    lines.push(format!("    {line}"));
                }
            }
        }
    }
    lines.push("(type `close` to return to the list)".to_string());
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        "(unnamed)"
    } else {
        name
    }
}
