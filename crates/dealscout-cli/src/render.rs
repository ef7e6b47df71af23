// Plain-text rendering of list views

use dealscout_client::{Analysis, Deal, Goal};
use dealscout_discovery::{ListKind, ListStatus, PageItem, PaginationView};

/// One-line summary of a record
pub trait Describe {
    fn describe(&self) -> String;
}

impl Describe for Deal {
    fn describe(&self) -> String {
        let mut line = self.title.clone();
        if let Some(price) = self.price {
            let currency = self.currency.as_deref().unwrap_or("$");
            line.push_str(&format!(" - {}{:.2}", currency, price));
        }
        if let Some(discount) = self.discount_percent() {
            line.push_str(&format!(" ({:.0}% off)", discount));
        }
        if let Some(category) = &self.category {
            line.push_str(&format!(" [{}]", category));
        }
        line
    }
}

impl Describe for Goal {
    fn describe(&self) -> String {
        let mut line = self.title.clone();
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => line.push_str(&format!(" - {:.2} to {:.2}", min, max)),
            (None, Some(max)) => line.push_str(&format!(" - up to {:.2}", max)),
            (Some(min), None) => line.push_str(&format!(" - from {:.2}", min)),
            (None, None) => {}
        }
        if let Some(priority) = &self.priority {
            line.push_str(&format!(" [{} priority]", priority));
        }
        if let Some(count) = self.deal_count {
            line.push_str(&format!(" ({} deals)", count));
        }
        line
    }
}

/// Headline for a settled list status; `None` while items are shown
pub fn status_line(kind: ListKind, status: &ListStatus) -> Option<String> {
    match status {
        ListStatus::Idle => Some(format!("No {} loaded.", kind)),
        ListStatus::Loading => Some(format!("Loading {}...", kind)),
        ListStatus::Ready => None,
        ListStatus::Empty { filtered: true } => Some(format!("No {} match these filters.", kind)),
        ListStatus::Empty { filtered: false } => Some(format!("No {} yet.", kind)),
        ListStatus::Failed { message } => Some(message.clone()),
    }
}

/// `1 … 4 5 [6] 7 8 … 20`
pub fn page_strip(view: &PaginationView) -> Option<String> {
    if view.hidden {
        return None;
    }
    let parts: Vec<String> = view
        .items
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == view.current => format!("[{}]", page),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect();
    Some(parts.join(" "))
}

pub fn analysis_report(analysis: &Analysis) -> String {
    let mut lines = Vec::new();
    if let Some(summary) = &analysis.summary {
        lines.push(summary.clone());
    }
    if let Some(score) = analysis.score {
        lines.push(format!("Score: {:.1}", score));
    }
    if let Some(recommendation) = &analysis.recommendation {
        lines.push(format!("Recommendation: {}", recommendation));
    }
    lines.extend(analysis.pros.iter().map(|pro| format!("+ {}", pro)));
    lines.extend(analysis.cons.iter().map(|con| format!("- {}", con)));
    lines.join("\n")
}
