mod inbound;
mod outbound;

pub use inbound::InboundFrame;
pub use outbound::{Enqueued, Outbound, OutboundFrame};
