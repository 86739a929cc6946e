use crate::console::Console;
use askama::Template;
use askama_web::WebTemplate;
use promotion_shared::{FormState, Numeric, PROMOTION_TYPES, Promotion};

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: &str, label: &str, current: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: value == current,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "console.html")]
pub struct ConsolePage {
    pub form: FormState,
    pub flash: String,
    pub results_html: String,
    pub type_options: Vec<SelectOption>,
    pub status_options: Vec<SelectOption>,
}

impl ConsolePage {
    pub fn from_console(console: &Console) -> Result<Self, askama::Error> {
        let form = console.form.clone();
        Ok(Self {
            results_html: render_results(console.results())?,
            flash: console.flash().to_string(),
            type_options: type_options(&form.promotion_type),
            status_options: vec![
                SelectOption::new("", "", &form.status),
                SelectOption::new("true", "Active", &form.status),
                SelectOption::new("false", "Inactive", &form.status),
            ],
            form,
        })
    }
}

// Known labels first; an unknown label from the service is kept selectable.
fn type_options(current: &str) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new("", "", current)];
    options.extend(
        PROMOTION_TYPES
            .iter()
            .map(|label| SelectOption::new(label, label, current)),
    );
    if !current.is_empty() && !PROMOTION_TYPES.contains(&current) {
        options.push(SelectOption::new(current, current, current));
    }
    options
}

/// One results row, already converted to cell text.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub promotion_type: String,
    pub product_id: String,
    pub start_date: String,
    pub duration: String,
    pub rule: String,
    pub status: String,
}

impl From<&Promotion> for TableRow {
    fn from(p: &Promotion) -> Self {
        let number = |n: Option<Numeric>| n.map(Numeric::to_field_value).unwrap_or_default();
        Self {
            id: number(p.id),
            name: p.name.clone().unwrap_or_default(),
            promotion_type: p.promotion_type.clone().unwrap_or_default(),
            product_id: number(p.product_id),
            start_date: p.start_date.clone().unwrap_or_default(),
            duration: number(p.duration),
            rule: p.rule.clone().unwrap_or_default(),
            status: p.status.map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTable {
    pub rows: Vec<TableRow>,
}

/// Renders the results table, or nothing before the first search.
pub fn render_results(results: Option<&[Promotion]>) -> Result<String, askama::Error> {
    match results {
        None => Ok(String::new()),
        Some(promotions) => ResultsTable {
            rows: promotions.iter().map(TableRow::from).collect(),
        }
        .render(),
    }
}
