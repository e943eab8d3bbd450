//! The writer and fragmenter (spec.md §4.4): builds the outbound handshake
//! message into `handshake.io`, then pulls `max_payload_size` slices and
//! hands each to the record layer. A handshake message may span multiple
//! records, but a single record never carries more than one handshake
//! message (spec.md §3 invariant 5).

use crate::core::connection::Connection;
use crate::core::errors::TlsResult;
use crate::core::handshake::callbacks::{Encoded, HandshakeCallbacks};
use crate::core::handshake::server_hello;
use crate::core::random::RandomSource;
use crate::core::record::types::{ContentType, FlushOutcome, RecordLayer};
use crate::core::state::{msg_type, HandshakeState};

pub enum WriteOutcome {
    /// One fragment was written and flushed; the state has not changed
    /// yet because `handshake.io` has more left to drain.
    Continuing,
    /// `handshake.io` fully drained and the state advanced.
    Advanced,
    WouldBlock,
}

fn message_type_for(state: HandshakeState) -> u8 {
    state.action().message_type
}

/// Builds the body of the current state's outbound message into
/// `conn.io`, patches its header (for HANDSHAKE-typed states), and records
/// `next_state`. Called once per state, the first time `write_io` finds
/// `handshake.io` empty.
fn encode_current_message<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource>(
    conn: &mut Connection<R, CB, Rnd>,
) -> TlsResult<()> {
    use HandshakeState::*;

    match conn.state {
        ServerHello => return server_hello::send(conn),
        ClientChangeCipherSpec => {
            let next = conn.callbacks.client_ccs_send(&mut conn.fields)?;
            conn.io.append(&[0x01]);
            conn.set_next_state(next);
            return Ok(());
        }
        ServerChangeCipherSpec => {
            let next = conn.callbacks.server_ccs_send(&mut conn.fields)?;
            conn.io.append(&[0x01]);
            conn.set_next_state(next);
            return Ok(());
        }
        _ => {}
    }

    let Encoded { body, next_state } = match conn.state {
        ClientHello => conn.callbacks.client_hello_send(&mut conn.fields)?,
        ServerCert => conn.callbacks.server_cert_send(&mut conn.fields)?,
        ServerCertStatus => conn.callbacks.server_cert_status_send(&mut conn.fields)?,
        ServerKey => conn.callbacks.server_key_send(&mut conn.fields)?,
        ServerCertReq => conn.callbacks.server_cert_request_send(&mut conn.fields)?,
        ServerHelloDone => conn.callbacks.server_hello_done_send(&mut conn.fields)?,
        ClientCert => conn.callbacks.client_cert_send(&mut conn.fields)?,
        ClientKey => conn.callbacks.client_key_send(&mut conn.fields)?,
        ClientCertVerify => conn.callbacks.client_cert_verify_send(&mut conn.fields)?,
        ClientFinished => conn.callbacks.client_finished_send(&mut conn.fields)?,
        ServerFinished => conn.callbacks.server_finished_send(&mut conn.fields)?,
        ServerHello | ClientChangeCipherSpec | ServerChangeCipherSpec => {
            unreachable!("handled by the early-return arms above")
        }
        HandshakeOver => {
            return Err(crate::core::errors::TlsError::Internal(
                "write_io invoked at the terminal state, which has no writer",
            ))
        }
    };

    conn.io.reserve_header();
    conn.io.append(&body);
    conn.io.patch_header(message_type_for(conn.state));
    conn.set_next_state(next_state);
    Ok(())
}

pub fn write_io<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource>(
    conn: &mut Connection<R, CB, Rnd>,
) -> TlsResult<WriteOutcome> {
    if conn.io.is_empty() {
        encode_current_message(conn)?;
    }

    let record_type = conn.state.action().record_type;
    let max_payload = conn.record_layer.max_write_payload_size();
    let slice = conn.io.drain(max_payload);
    conn.record_layer.write_record(record_type, &slice)?;
    if record_type == ContentType::Handshake {
        conn.transcripts.update_all(&slice);
    }

    match conn.record_layer.flush()? {
        FlushOutcome::WouldBlock => return Ok(WriteOutcome::WouldBlock),
        FlushOutcome::Flushed => {}
    }

    if conn.io.is_empty() {
        conn.io.wipe();
        conn.commit_transition()?;
        Ok(WriteOutcome::Advanced)
    } else {
        Ok(WriteOutcome::Continuing)
    }
}
