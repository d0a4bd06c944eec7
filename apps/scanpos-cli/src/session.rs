//! # Scanner Session
//!
//! Everything the station knows between two events: the debounce gate, the
//! persistent cart, the draft being edited, the camera status and the
//! status line shown to the operator.
//!
//! ## Scan Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  decode ──► accept_scan ──► Some(barcode) ──► (event loop spawns lookup)│
//! │                  │                                   │                  │
//! │                  └── None (busy / cooling / dup)     ▼                  │
//! │                                               apply_lookup(outcome)     │
//! │  lookup <b> ──► execute ──► StartLookup(b) ──►       │                  │
//! │                    │                                 ├─ Found, new      │
//! │                    └── BUSY if a lookup is in flight │    → add qty 1   │
//! │                                                      ├─ Found, in cart  │
//! │                                                      │    → draft only  │
//! │                                                      └─ NotFound        │
//! │                                                           → draft with  │
//! │                                                             barcode     │
//! │                                                                         │
//! │  Every path ends with the gate cooling down, measured from completion. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session never performs I/O other than snapshot writes, and never reads
//! the clock: callers pass `Instant`s in, so tests drive time explicitly.

use std::time::Instant;

use tracing::{debug, info};

use scanpos_catalog::{LookupOutcome, NotFoundReason};
use scanpos_core::validation::validate_barcode;
use scanpos_core::{
    AddOutcome, CartLedger, GateState, LineDraft, ScanDebouncer, ScanDecision, ScanEvent,
    MAX_ITEM_QUANTITY,
};

use crate::commands::{Command, HELP};
use crate::config::ScannerConfig;
use crate::error::{AppError, AppResult};
use crate::render::{render_cart, render_draft};
use crate::state::{PersistentCart, WriteThrough};

/// Default prompt shown while idle.
pub const IDLE_STATUS: &str = "Scan a product or enter a barcode manually.";

// =============================================================================
// Status Types
// =============================================================================

/// Whether the decoder path is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraStatus {
    Live,
    NotConfigured,
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// The single status message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            StatusKind::Error => write!(f, "! {}", self.text),
            _ => write!(f, "> {}", self.text),
        }
    }
}

/// What the event loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Only the status line changed.
    Done,
    /// Print this block.
    Show(String),
    /// Run a catalog lookup for this barcode.
    StartLookup(String),
    /// End the session.
    Quit,
}

// =============================================================================
// Session
// =============================================================================

pub struct ScannerSession {
    config: ScannerConfig,
    debouncer: ScanDebouncer,
    cart: PersistentCart,
    draft: LineDraft,
    camera: CameraStatus,
    status: StatusLine,
}

impl ScannerSession {
    pub fn new(config: ScannerConfig, cart: PersistentCart, camera: CameraStatus) -> Self {
        let status = match &camera {
            CameraStatus::Unavailable(reason) => StatusLine {
                kind: StatusKind::Error,
                text: reason.clone(),
            },
            _ => StatusLine {
                kind: StatusKind::Info,
                text: IDLE_STATUS.to_string(),
            },
        };

        ScannerSession {
            debouncer: ScanDebouncer::new(config.cooldown()),
            config,
            cart,
            draft: LineDraft::empty(),
            camera,
            status,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn draft(&self) -> &LineDraft {
        &self.draft
    }

    pub fn cart(&self) -> &CartLedger {
        self.cart.ledger()
    }

    pub fn gate(&self) -> &GateState {
        self.debouncer.state()
    }

    /// When the gate re-arms, for the event loop's timer.
    pub fn rearm_deadline(&self) -> Option<Instant> {
        self.debouncer.rearm_deadline()
    }

    /// Re-arms the gate if the cooldown has passed.
    pub fn poll_rearm(&mut self, now: Instant) -> bool {
        self.debouncer.poll_rearm(now)
    }

    // =========================================================================
    // Scan Path
    // =========================================================================

    /// Offers a decode to the gate. Returns the barcode to look up, if any.
    pub fn accept_scan(&mut self, event: &ScanEvent) -> Option<String> {
        if self.camera != CameraStatus::Live {
            debug!(barcode = %event.barcode, "Decode ignored: camera path is off");
            return None;
        }

        match self.debouncer.offer(event) {
            ScanDecision::Accepted { barcode } => {
                self.set_info(format!("Looking up {}...", barcode));
                Some(barcode)
            }
            ScanDecision::Rejected(_) => None,
        }
    }

    /// Marks the decoder as gone for the rest of the session.
    pub fn camera_lost(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        info!(reason = %reason, "Camera path disabled");
        self.camera = CameraStatus::Unavailable(reason.clone());
        self.set_error(format!("{} Manual entry is still available.", reason));
    }

    /// Applies a finished lookup.
    ///
    /// Starts the cooldown, then fills the draft and (for a product that
    /// is not yet in the cart) adds it with quantity 1.
    pub async fn apply_lookup(&mut self, outcome: LookupOutcome, completed_at: Instant) {
        self.debouncer.complete_lookup(completed_at);

        match outcome {
            LookupOutcome::Found(product) => {
                self.draft = LineDraft::from(&product);
                self.set_success(format!("Found: {}", product.name));

                let in_cart = self
                    .cart
                    .ledger()
                    .find_by_barcode(&product.barcode)
                    .map(|line| line.quantity);
                if let Some(quantity) = in_cart {
                    self.set_info(format!(
                        "{} is already in the cart. Quantity: {}",
                        product.name, quantity
                    ));
                    return;
                }

                let draft = self.draft.clone();
                match self.cart.add(&draft).await {
                    Ok(result) => self.report_add(&draft, result),
                    Err(e) => self.report(e),
                }
            }
            LookupOutcome::NotFound { barcode, reason } => {
                self.draft = LineDraft::for_barcode(barcode.as_str());
                match reason {
                    NotFoundReason::NoMatch => self.set_info(format!(
                        "No product found for barcode {}. Add it manually.",
                        barcode
                    )),
                    NotFoundReason::UnexpectedPayload => {
                        self.set_info(format!("Scanned barcode: {}", barcode))
                    }
                    NotFoundReason::Failed(message) => {
                        self.set_error(format!("Lookup failed: {}", message))
                    }
                }
            }
        }
    }

    // =========================================================================
    // Command Path
    // =========================================================================

    /// Parses and runs one input line. Errors land on the status line.
    pub async fn handle_line(&mut self, line: &str, now: Instant) -> Reply {
        let command = match Command::parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::Done,
            Err(e) => {
                self.report(e);
                return Reply::Done;
            }
        };

        match self.execute(command, now).await {
            Ok(reply) => reply,
            Err(e) => {
                self.report(e);
                Reply::Done
            }
        }
    }

    /// Runs one command.
    pub async fn execute(&mut self, command: Command, now: Instant) -> AppResult<Reply> {
        debug!(?command, "Executing command");

        match command {
            Command::Lookup(raw) => {
                let barcode =
                    validate_barcode(&raw).map_err(|e| AppError::validation(e.to_string()))?;
                self.debouncer
                    .begin_manual(&barcode, now)
                    .map_err(AppError::from)?;
                self.set_info(format!("Looking up {}...", barcode));
                Ok(Reply::StartLookup(barcode))
            }

            Command::Name(name) => {
                self.draft.name = name;
                self.set_info("Draft updated");
                Ok(Reply::Done)
            }

            Command::Price(price) => {
                self.draft.price = Some(price);
                self.set_info("Draft updated");
                Ok(Reply::Done)
            }

            Command::Qty(quantity) => {
                self.draft.quantity = quantity;
                self.set_info("Draft updated");
                Ok(Reply::Done)
            }

            Command::Add => {
                let draft = self.draft.clone();
                let result = self.cart.add(&draft).await?;
                self.report_add(&draft, result);
                self.draft = LineDraft::empty();
                Ok(Reply::Done)
            }

            Command::Set { line, quantity } => {
                let id = self.cart.line_at(line)?;
                let result = self.cart.set_quantity(id, quantity).await;
                self.report_quantity(line, quantity, result);
                Ok(Reply::Done)
            }

            Command::Inc(line) => {
                let id = self.cart.line_at(line)?;
                let result = self.cart.increment(id).await;
                let quantity = self.line_quantity(line);
                self.report_quantity(line, quantity, result);
                Ok(Reply::Done)
            }

            Command::Dec(line) => {
                let id = self.cart.line_at(line)?;
                let result = self.cart.decrement(id).await;
                let quantity = self.line_quantity(line);
                self.report_quantity(line, quantity, result);
                Ok(Reply::Done)
            }

            Command::Remove(line) => {
                let id = self.cart.line_at(line)?;
                let WriteThrough { value, save_error } = self.cart.remove(id).await;
                let text = match value {
                    Some(removed) => format!("{} removed from cart", removed.name),
                    None => "Nothing to remove".to_string(),
                };
                self.report_write(text, save_error);
                Ok(Reply::Done)
            }

            Command::Clear => {
                let WriteThrough { save_error, .. } = self.cart.clear().await;
                self.report_write("Cart cleared".to_string(), save_error);
                Ok(Reply::Done)
            }

            Command::Checkout => {
                let WriteThrough { value, save_error } = self.cart.checkout().await?;
                let text = format!(
                    "Order complete: {} items, {}",
                    value.item_count,
                    self.config.format_currency(value.total)
                );
                self.report_write(text, save_error);
                Ok(Reply::Done)
            }

            Command::Cart => Ok(Reply::Show(render_cart(self.cart.ledger(), &self.config))),

            Command::Status => Ok(Reply::Show(self.render_status())),

            Command::Help => Ok(Reply::Show(HELP.to_string())),

            Command::Quit => Ok(Reply::Quit),
        }
    }

    /// Status block: camera, gate, draft and the status line.
    pub fn render_status(&self) -> String {
        let camera = match &self.camera {
            CameraStatus::Live => "live".to_string(),
            CameraStatus::NotConfigured => "not configured (manual entry only)".to_string(),
            CameraStatus::Unavailable(reason) => format!("unavailable ({})", reason),
        };
        let gate = match self.gate() {
            GateState::Armed => "ready".to_string(),
            GateState::LookingUp { barcode } => format!("looking up {}", barcode),
            GateState::CoolingDown { .. } => "cooling down".to_string(),
        };
        let last_scan = self
            .debouncer
            .last_accepted()
            .map(|(barcode, _)| barcode.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "Camera:   {}\nScanner:  {} (cooldown {} ms, last scan {})\n{}\n{}",
            camera,
            gate,
            self.debouncer.cooldown().as_millis(),
            last_scan,
            render_draft(&self.draft, &self.config),
            self.status
        )
    }

    // =========================================================================
    // Status Helpers
    // =========================================================================

    fn line_quantity(&self, line: usize) -> i64 {
        line.checked_sub(1)
            .and_then(|index| self.cart.ledger().lines().get(index))
            .map(|l| l.quantity)
            .unwrap_or_default()
    }

    fn report_add(&mut self, draft: &LineDraft, result: WriteThrough<AddOutcome>) {
        let name = draft.name.trim();
        let text = match result.value {
            AddOutcome::Appended { .. } => format!("{} added to cart", name),
            AddOutcome::QuantityReplaced { quantity, .. } => {
                format!("{} quantity updated: {}", name, quantity)
            }
        };
        self.report_write(text, result.save_error);
    }

    fn report_quantity(&mut self, line: usize, quantity: i64, result: WriteThrough<bool>) {
        if !result.value {
            let text = if quantity < 1 {
                "Quantity must be at least 1".to_string()
            } else if quantity > MAX_ITEM_QUANTITY {
                format!("Quantity cannot exceed {}", MAX_ITEM_QUANTITY)
            } else {
                format!("Line {} unchanged", line)
            };
            self.set_info(text);
            return;
        }
        self.report_write(format!("Line {} quantity: {}", line, quantity), result.save_error);
    }

    fn report_write(&mut self, text: String, save_error: Option<AppError>) {
        match save_error {
            None => self.set_success(text),
            Some(e) => self.set_error(format!("{}, but the cart could not be saved: {}", text, e.message)),
        }
    }

    fn report(&mut self, error: AppError) {
        debug!(code = error.code.as_str(), message = %error.message, "Operation failed");
        self.set_error(error.message);
    }

    fn set_info(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Info, text.into());
    }

    fn set_success(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Success, text.into());
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Error, text.into());
    }

    fn set(&mut self, kind: StatusKind, text: String) {
        self.status = StatusLine { kind, text };
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scanpos_catalog::{lookup_product, CatalogClient, CatalogError, CatalogResult};
    use scanpos_core::{Money, Product};
    use scanpos_store::{Database, DbConfig, SnapshotStore};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const COOLDOWN: Duration = Duration::from_millis(3000);

    struct StubCatalog {
        payload: CatalogResult<serde_json::Value>,
        fetches: AtomicUsize,
    }

    impl StubCatalog {
        fn new() -> Self {
            StubCatalog {
                payload: Ok(json!([
                    {"barcode": "123", "name": "Water", "price": 1.5},
                    {"barcode": "456", "name": "Bread", "price": "0.80"}
                ])),
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogClient for StubCatalog {
        async fn fetch_products(&self) -> CatalogResult<serde_json::Value> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match &self.payload {
                Ok(value) => Ok(value.clone()),
                Err(_) => Err(CatalogError::Timeout),
            }
        }
    }

    struct Harness {
        _db: Database,
        store: Arc<dyn SnapshotStore>,
        session: ScannerSession,
        catalog: StubCatalog,
    }

    impl Harness {
        async fn new() -> Self {
            let db = Database::new(DbConfig::in_memory()).await.unwrap();
            let store: Arc<dyn SnapshotStore> = Arc::new(db.snapshots());
            let cart = PersistentCart::hydrate(store.clone(), "cart_items").await.unwrap();

            let mut config = ScannerConfig::default();
            config.scanner.cooldown_ms = COOLDOWN.as_millis() as u64;

            Harness {
                _db: db,
                store,
                session: ScannerSession::new(config, cart, CameraStatus::Live),
                catalog: StubCatalog::new(),
            }
        }

        /// What the event loop does for a decode: gate, then lookup, then apply.
        async fn scan(&mut self, barcode: &str, at: Instant, lookup_takes: Duration) -> bool {
            let event = ScanEvent::new(barcode, at);
            match self.session.accept_scan(&event) {
                Some(accepted) => {
                    let outcome = lookup_product(&self.catalog, &accepted).await;
                    self.session.apply_lookup(outcome, at + lookup_takes).await;
                    true
                }
                None => false,
            }
        }

        async fn run(&mut self, line: &str, now: Instant) -> Reply {
            self.session.handle_line(line, now).await
        }

        fn status(&self) -> &str {
            &self.session.status().text
        }
    }

    #[tokio::test]
    async fn test_identical_scans_within_cooldown_fire_one_lookup() {
        let mut h = Harness::new().await;
        let t0 = Instant::now();

        // Same tick: the gate moves to LookingUp on the first event.
        let first = ScanEvent::new("123", t0);
        let second = ScanEvent::new("123", t0);
        assert!(h.session.accept_scan(&first).is_some());
        assert!(h.session.accept_scan(&second).is_none());

        let outcome = lookup_product(&h.catalog, "123").await;
        let done = t0 + Duration::from_millis(200);
        h.session.apply_lookup(outcome, done).await;

        assert!(!h.scan("123", t0 + Duration::from_millis(500), Duration::ZERO).await);
        assert!(!h.scan("123", t0 + Duration::from_millis(3100), Duration::ZERO).await);
        assert_eq!(h.catalog.fetches(), 1);

        // Cooldown is measured from completion (t0 + 200ms).
        assert!(h.scan("123", t0 + Duration::from_millis(3200), Duration::ZERO).await);
        assert_eq!(h.catalog.fetches(), 2);
    }

    #[tokio::test]
    async fn test_found_product_added_once() {
        let mut h = Harness::new().await;
        let t0 = Instant::now();

        assert!(h.scan("123", t0, Duration::from_millis(50)).await);
        assert_eq!(h.status(), "Water added to cart");
        assert_eq!(h.session.cart().line_count(), 1);
        assert_eq!(h.session.draft().name, "Water");

        // Scanning it again later does not touch the cart.
        assert!(h.scan("123", t0 + Duration::from_secs(10), Duration::ZERO).await);
        assert_eq!(h.status(), "Water is already in the cart. Quantity: 1");
        assert_eq!(h.session.cart().total_items(), 1);
        assert_eq!(h.session.draft().price, Some(Money::from_cents(150)));
    }

    #[tokio::test]
    async fn test_not_found_then_manual_add() {
        let mut h = Harness::new().await;
        let t0 = Instant::now();

        assert!(h.scan("555", t0, Duration::ZERO).await);
        assert_eq!(h.status(), "No product found for barcode 555. Add it manually.");
        assert_eq!(h.session.draft(), &LineDraft::for_barcode("555"));

        h.run("add", t0).await;
        assert_eq!(h.session.status().kind, StatusKind::Error);
        assert!(h.session.cart().is_empty());

        h.run("name Gum", t0).await;
        h.run("price 0.45", t0).await;
        h.run("qty 2", t0).await;
        h.run("add", t0).await;

        assert_eq!(h.status(), "Gum added to cart");
        assert_eq!(h.session.cart().total_price(), Money::from_cents(90));
        assert!(h.session.draft().is_blank());
    }

    #[tokio::test]
    async fn test_lookup_failure_and_unexpected_payload() {
        let mut h = Harness::new().await;
        let t0 = Instant::now();

        h.catalog.payload = Err(CatalogError::Timeout);
        assert!(h.scan("123", t0, Duration::ZERO).await);
        assert_eq!(h.status(), "Lookup failed: Catalog request timed out");
        assert_eq!(h.session.draft().barcode, "123");
        assert!(matches!(h.session.gate(), GateState::CoolingDown { .. }));

        h.catalog.payload = Ok(json!({"error": "maintenance"}));
        assert!(h.scan("456", t0 + Duration::from_secs(5), Duration::ZERO).await);
        assert_eq!(h.status(), "Scanned barcode: 456");
        assert!(h.session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_manual_lookup_rules() {
        let mut h = Harness::new().await;
        let t0 = Instant::now();

        assert!(h.session.accept_scan(&ScanEvent::new("123", t0)).is_some());

        // In flight: manual entry is rejected.
        assert_eq!(h.run("lookup 456", t0).await, Reply::Done);
        assert_eq!(h.status(), "A lookup is already in progress. Please wait.");

        let outcome = lookup_product(&h.catalog, "123").await;
        h.session.apply_lookup(outcome, t0).await;

        // Cooling down: manual entry goes through.
        assert_eq!(
            h.run("lookup  456 ", t0 + Duration::from_millis(10)).await,
            Reply::StartLookup("456".to_string())
        );
    }

    #[tokio::test]
    async fn test_water_walkthrough() {
        let mut h = Harness::new().await;
        let now = Instant::now();

        assert!(h.scan("123", now, Duration::ZERO).await);
        assert_eq!(h.session.cart().total_price(), Money::from_cents(150));

        h.run("qty 3", now).await;
        h.run("add", now).await;
        assert_eq!(h.status(), "Water quantity updated: 3");
        assert_eq!(h.session.cart().line_count(), 1);
        assert_eq!(h.session.cart().total_price(), Money::from_cents(450));

        h.run("rm 1", now).await;
        assert!(h.session.cart().is_empty());
        assert_eq!(h.session.cart().total_price().to_string(), "0.00");
    }

    #[tokio::test]
    async fn test_quantity_commands() {
        let mut h = Harness::new().await;
        let now = Instant::now();
        assert!(h.scan("123", now, Duration::ZERO).await);

        h.run("set 1 0", now).await;
        assert_eq!(h.status(), "Quantity must be at least 1");
        h.run("set 1 -2", now).await;
        assert_eq!(h.session.cart().total_items(), 1);

        h.run("dec 1", now).await;
        assert_eq!(h.session.cart().total_items(), 1);

        h.run("inc 1", now).await;
        assert_eq!(h.status(), "Line 1 quantity: 2");
        h.run("set 1 7", now).await;
        assert_eq!(h.session.cart().total_items(), 7);

        h.run("set 9 1", now).await;
        assert_eq!(h.status(), "Cart line not found: 9");
    }

    #[tokio::test]
    async fn test_oversized_quantity_is_rejected_and_cart_still_renders() {
        let mut h = Harness::new().await;
        let now = Instant::now();
        assert!(h.scan("123", now, Duration::ZERO).await);

        h.run("set 1 9223372036854775807", now).await;
        assert_eq!(h.status(), "Quantity cannot exceed 999");
        assert_eq!(h.session.cart().total_items(), 1);

        h.run("set 1 999", now).await;
        h.run("inc 1", now).await;
        assert_eq!(h.status(), "Line 1 unchanged");
        assert_eq!(h.session.cart().total_items(), 999);

        match h.run("cart", now).await {
            Reply::Show(text) => assert!(text.ends_with("Items: 999   Total: 1498.50 AZN")),
            other => panic!("expected Show, got {:?}", other),
        }
        h.run("checkout", now).await;
        assert_eq!(h.status(), "Order complete: 999 items, 1498.50 AZN");
    }

    #[tokio::test]
    async fn test_checkout_clears_and_erases() {
        let mut h = Harness::new().await;
        let now = Instant::now();

        assert!(h.scan("123", now, Duration::ZERO).await);
        h.run("set 1 3", now).await;
        h.run("checkout", now).await;

        assert_eq!(h.status(), "Order complete: 3 items, 4.50 AZN");
        assert!(h.session.cart().is_empty());
        assert!(h.store.load("cart_items").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_camera_paths() {
        let mut h = Harness::new().await;
        let now = Instant::now();

        h.session.camera_lost("Camera not found or permission denied.");
        assert_eq!(h.session.status().kind, StatusKind::Error);
        assert!(h.session.accept_scan(&ScanEvent::new("123", now)).is_none());

        // Manual entry still works.
        assert_eq!(
            h.run("lookup 123", now).await,
            Reply::StartLookup("123".to_string())
        );
    }

    #[tokio::test]
    async fn test_view_commands() {
        let mut h = Harness::new().await;
        let now = Instant::now();

        assert!(matches!(h.run("help", now).await, Reply::Show(_)));
        assert_eq!(h.run("cart", now).await, Reply::Show("Cart is empty.".to_string()));
        match h.run("status", now).await {
            Reply::Show(text) => {
                assert!(text.contains("Scanner:  ready (cooldown 3000 ms, last scan -)"));
            }
            other => panic!("expected Show, got {:?}", other),
        }
        assert_eq!(h.run("quit", now).await, Reply::Quit);
        assert_eq!(h.run("", now).await, Reply::Done);
    }

    #[tokio::test]
    async fn test_found_product_with_zero_price_is_added() {
        let mut h = Harness::new().await;
        let product = Product {
            barcode: "000".to_string(),
            name: "Free sample".to_string(),
            price: Money::zero(),
        };

        assert!(h.session.accept_scan(&ScanEvent::new("000", Instant::now())).is_some());
        h.session
            .apply_lookup(LookupOutcome::Found(product), Instant::now())
            .await;
        assert_eq!(h.status(), "Free sample added to cart");
    }
}
