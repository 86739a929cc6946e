use promotion_shared::{FormState, Promotion};

/// Fixed texts shown in the flash area.
pub mod flash {
    pub const SUCCESS: &str = "Success";
    pub const DELETED: &str = "Promotion has been Deleted!";
    pub const ACTIVATED: &str = "Promotion has been Activated!";
    pub const DEACTIVATED: &str = "Promotion has been Deactivated!";
    pub const SERVER_ERROR: &str = "Server error!";
}

/// Position of a remote request in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Everything the console page shows: the form, the flash line and the
/// results table. `results` stays `None` until the first search.
#[derive(Debug, Clone, Default)]
pub struct Console {
    pub form: FormState,
    flash: String,
    results: Option<Vec<Promotion>>,
    issued: u64,
}

impl Console {
    pub fn flash(&self) -> &str {
        &self.flash
    }

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash = message.into();
    }

    pub fn clear_flash(&mut self) {
        self.flash.clear();
    }

    pub fn results(&self) -> Option<&[Promotion]> {
        self.results.as_deref()
    }

    /// Replaces the results table and copies the first row into the form.
    pub fn show_results(&mut self, results: Vec<Promotion>) {
        if let Some(first) = results.first() {
            self.form.populate(first);
        }
        self.results = Some(results);
    }

    /// Empties the table body; the header survives.
    pub fn clear_results(&mut self) {
        if let Some(rows) = self.results.as_mut() {
            rows.clear();
        }
    }

    /// Resets the form and the flash line. Results are untouched.
    pub fn clear(&mut self) {
        self.form.clear();
        self.flash.clear();
    }

    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// A ticket is current while no later request has been issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}
