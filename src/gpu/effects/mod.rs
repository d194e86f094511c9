// ============================================
// Effects - Туман и пульсы взрывов
// ============================================

pub mod fog;
pub mod pulse;

pub use fog::{fog_band, fog_blend, fog_range};
pub use pulse::{Pulse, PulseKind, PulseRing, PulseSlot};
