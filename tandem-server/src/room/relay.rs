use crate::error::RelayError;
use crate::room::peer::Peer;
use crate::room::status;
use crate::transport::Enqueued;
use tandem_core::Transfer;
use tracing::{debug, info};

/// Forwards a completed transfer from `sender` to `recipient` and echoes it
/// back to `sender`.
///
/// The recipient copy is tagged `isSender:false`, the echo `isSender:true`;
/// everything else is forwarded untouched. Delivery is fire-and-forget: the
/// frames are queued and nothing waits for the sockets.
pub(crate) fn relay_transfer(
    sender: &Peer,
    recipient: Option<&Peer>,
    transfer: Transfer,
) -> Result<(), RelayError> {
    let Some(recipient) = recipient else {
        sender.notify(status::no_recipient());
        return Err(RelayError::NoRecipient);
    };

    let Transfer { metadata, payload } = transfer;
    let file_name = metadata.file_name.clone();

    match recipient
        .outbound
        .push_transfer(metadata.tagged(false), payload.clone())
    {
        Enqueued::Closed => {
            debug!(peer = %recipient.id, "Recipient is closing, transfer dropped");
            sender.notify(status::no_recipient());
            return Err(RelayError::NoRecipient);
        }
        Enqueued::Rejected => return Err(abort(sender, recipient, file_name)),
        Enqueued::Queued | Enqueued::EvictedControl => {}
    }

    if sender.outbound.push_transfer(metadata.tagged(true), payload) == Enqueued::Rejected {
        return Err(abort(sender, recipient, file_name));
    }

    info!(
        from = %sender.role,
        to = %recipient.role,
        file = %file_name,
        size = metadata.file_size,
        "Transfer relayed"
    );
    Ok(())
}

fn abort(sender: &Peer, recipient: &Peer, file_name: String) -> RelayError {
    sender.notify(status::transfer_aborted(&file_name));
    recipient.notify(status::transfer_aborted(&file_name));
    RelayError::TransferAborted { file_name }
}
