use crate::models::MenuItem;
use rust_decimal::Decimal;

/// Most units of one item a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}

/// Item count and value of the cart; drives the floating cart indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    pub item_count: u64,
    pub value: Decimal,
}

impl CartTotals {
    pub fn indicator_visible(&self) -> bool {
        self.item_count > 0
    }
}

/// Lines waiting to be sent to the kitchen. At most one line per item id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    totals: CartTotals,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    pub fn quantity_of(&self, item_id: i64) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.item.id == item_id)
            .map(|line| line.quantity)
    }

    /// Merges into an existing line or starts a new one with quantity 1.
    /// A line already at [`MAX_LINE_QUANTITY`] stays there.
    pub fn add(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY),
            None => self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            }),
        }
        self.recompute();
    }

    /// Sets the quantity of an existing line; zero or less drops it, more
    /// than [`MAX_LINE_QUANTITY`] is capped. Unknown ids are ignored.
    pub fn set_quantity(&mut self, item_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item_id) {
            line.quantity = u32::try_from(quantity)
                .unwrap_or(u32::MAX)
                .min(MAX_LINE_QUANTITY);
            self.recompute();
        }
    }

    pub fn remove(&mut self, item_id: i64) {
        self.lines.retain(|line| line.item.id != item_id);
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.totals = CartTotals {
            item_count: self.lines.iter().map(|line| u64::from(line.quantity)).sum(),
            value: self.lines.iter().map(CartLine::subtotal).sum(),
        };
    }
}
