use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

use crate::constants::LOT_QUANTITY_EPSILON;
use crate::utils::decimal_utils::safe_div;

fn lot_epsilon() -> Decimal {
    Decimal::from_str(LOT_QUANTITY_EPSILON).unwrap_or_else(|_| Decimal::new(1, 12))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    /// Quantity still held from this acquisition.
    pub quantity: Decimal,
    /// Acquisition cost per unit with the acquisition fee folded in.
    pub cost_per_unit: Decimal,
}

impl Lot {
    pub fn cost_basis(&self) -> Decimal {
        self.quantity.saturating_mul(self.cost_per_unit)
    }
}

/// Open lots of a single asset, oldest first.
#[derive(Debug, Clone, Default)]
pub struct LotQueue {
    lots: VecDeque<Lot>,
}

impl LotQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a lot. The fee is spread over the acquired quantity.
    pub fn add_lot(&mut self, quantity: Decimal, price: Decimal, fee: Decimal) {
        if quantity <= Decimal::ZERO {
            warn!("Skipping lot with non-positive quantity: {}", quantity);
            return;
        }
        let cost_per_unit = quantity
            .checked_mul(price)
            .and_then(|cost| cost.checked_add(fee))
            .and_then(|cost| cost.checked_div(quantity));
        let Some(cost_per_unit) = cost_per_unit else {
            warn!(
                "Skipping lot of {} at {} (fee {}): cost does not fit in a decimal",
                quantity, price, fee
            );
            return;
        };
        self.lots.push_back(Lot {
            quantity,
            cost_per_unit,
        });
    }

    /// Consumes lots oldest first and returns the realized PnL of the disposal.
    ///
    /// Proceeds net of the fee are spread evenly over the disposed quantity.
    /// Quantity beyond what the queue holds is dropped. A disposal whose
    /// proceeds do not fit in a decimal is skipped and leaves the lots intact.
    pub fn dispose_fifo(&mut self, quantity: Decimal, price: Decimal, fee: Decimal) -> Decimal {
        if quantity <= Decimal::ZERO {
            warn!("Skipping disposal with non-positive quantity: {}", quantity);
            return Decimal::ZERO;
        }

        let net_price = quantity
            .checked_mul(price)
            .and_then(|proceeds| proceeds.checked_sub(fee))
            .and_then(|proceeds| proceeds.checked_div(quantity));
        let Some(net_price) = net_price else {
            warn!(
                "Skipping disposal of {} at {} (fee {}): proceeds do not fit in a decimal",
                quantity, price, fee
            );
            return Decimal::ZERO;
        };

        let epsilon = lot_epsilon();
        let mut to_dispose = quantity;
        let mut realized = Decimal::ZERO;

        while to_dispose > epsilon {
            let Some(front) = self.lots.front_mut() else {
                break;
            };
            let used = front.quantity.min(to_dispose);
            let gain = net_price
                .saturating_sub(front.cost_per_unit)
                .saturating_mul(used);
            realized = realized.saturating_add(gain);
            front.quantity -= used;
            to_dispose -= used;
            if front.quantity <= epsilon {
                self.lots.pop_front();
            }
        }

        if to_dispose > epsilon {
            warn!(
                "Disposal of {} exceeds held quantity by {}. Excess ignored.",
                quantity, to_dispose
            );
        } else {
            debug!("Disposed {} at net price {}", quantity, net_price);
        }

        realized
    }

    pub fn quantity(&self) -> Decimal {
        self.lots
            .iter()
            .fold(Decimal::ZERO, |acc, lot| acc.saturating_add(lot.quantity))
    }

    pub fn cost_basis(&self) -> Decimal {
        self.lots
            .iter()
            .fold(Decimal::ZERO, |acc, lot| acc.saturating_add(lot.cost_basis()))
    }

    /// Average cost per held unit, or zero when nothing is held.
    pub fn average_cost(&self) -> Decimal {
        safe_div(self.cost_basis(), self.quantity())
    }

    pub fn lots(&self) -> &VecDeque<Lot> {
        &self.lots
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}
