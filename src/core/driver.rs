//! The read-path orchestration (spec.md §4.3) and the top-level drive loop
//! `negotiate` (spec.md §4.5).

use log::{debug, trace, warn};

use crate::core::connection::{Connection, PendingRecord};
use crate::core::errors::{TlsError, TlsResult};
use crate::core::handshake::callbacks::HandshakeCallbacks;
use crate::core::handshake::server_hello;
use crate::core::random::RandomSource;
use crate::core::record::reader::FeedOutcome;
use crate::core::record::types::{ContentType, FlushOutcome, ReadOutcome, RecordLayer};
use crate::core::record::writer::{self, WriteOutcome};
use crate::core::state::{HandshakeState, Writer};

/// Cooperative suspension reason, returned by `negotiate` instead of an
/// error (spec.md §5, §7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blocked {
    NotBlocked,
    OnRead,
    OnWrite,
}

enum ReadIoOutcome {
    Advanced,
    WouldBlock,
}

/// Dispatches one fully-reassembled HANDSHAKE-typed message to the handler
/// named by the current state, and records `next_state` (spec.md §4.3: "the
/// driver verifies `message_type == state_machine[state].message_type`...
/// Dispatch to the per-state handler").
fn dispatch_handshake_recv<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource>(
    conn: &mut Connection<R, CB, Rnd>,
    body: &[u8],
) -> TlsResult<()> {
    use HandshakeState::*;

    if conn.state == ServerHello {
        return server_hello::recv(conn, body);
    }

    let next = match conn.state {
        ClientHello => conn.callbacks.client_hello_recv(body, &mut conn.fields)?,
        ServerCert => conn.callbacks.server_cert_recv(body, &mut conn.fields)?,
        ServerCertStatus => conn.callbacks.server_cert_status_recv(body, &mut conn.fields)?,
        ServerKey => conn.callbacks.server_key_recv(body, &mut conn.fields)?,
        ServerCertReq => conn.callbacks.server_cert_request_recv(body, &mut conn.fields)?,
        ServerHelloDone => conn.callbacks.server_hello_done_recv(body, &mut conn.fields)?,
        ClientCert => conn.callbacks.client_cert_recv(body, &mut conn.fields)?,
        ClientKey => conn.callbacks.client_key_recv(body, &mut conn.fields)?,
        ClientCertVerify => conn.callbacks.client_cert_verify_recv(body, &mut conn.fields)?,
        ClientFinished => conn.callbacks.client_finished_recv(body, &mut conn.fields)?,
        ServerFinished => conn.callbacks.server_finished_recv(body, &mut conn.fields)?,
        ServerHello => unreachable!("handled above"),
        ClientChangeCipherSpec | ServerChangeCipherSpec | HandshakeOver => {
            return Err(TlsError::Internal(
                "dispatch_handshake_recv invoked at a non-HANDSHAKE state",
            ))
        }
    };
    conn.set_next_state(next);
    Ok(())
}

fn dispatch_ccs_recv<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource>(
    conn: &mut Connection<R, CB, Rnd>,
) -> TlsResult<()> {
    let next = match conn.state {
        HandshakeState::ClientChangeCipherSpec => conn.callbacks.client_ccs_recv(&mut conn.fields)?,
        HandshakeState::ServerChangeCipherSpec => conn.callbacks.server_ccs_recv(&mut conn.fields)?,
        other => {
            return Err(TlsError::UnexpectedMessageType { state: other, expected: 0, found: 0 })
        }
    };
    conn.set_next_state(next);
    Ok(())
}

/// Processes whatever is left of `conn.pending_record`, fetching a fresh
/// record from the record layer when it is exhausted. Returns once either a
/// state-changing message has been fully handled (`Advanced`) or the
/// transport has nothing more to offer right now (`WouldBlock`).
fn process_one_record<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource>(
    conn: &mut Connection<R, CB, Rnd>,
) -> TlsResult<ReadIoOutcome> {
    loop {
        let needs_fresh_record = match &conn.pending_record {
            None => true,
            Some(p) => p.is_exhausted(),
        };
        if needs_fresh_record {
            match conn.record_layer.read_record()? {
                ReadOutcome::WouldBlock => return Ok(ReadIoOutcome::WouldBlock),
                ReadOutcome::Closed => {
                    conn.closed = true;
                    return Err(TlsError::Closed);
                }
                ReadOutcome::Record(rec) => {
                    conn.pending_record = Some(PendingRecord {
                        content_type: rec.content_type,
                        payload: rec.payload,
                        cursor: 0,
                        is_sslv2: rec.is_sslv2,
                        sslv2_header: rec.sslv2_header,
                    });
                }
            }
        }

        let content_type = conn.pending_record.as_ref().unwrap().content_type;
        trace!("read_io: processing record of type {:?}", content_type);

        match content_type {
            ContentType::ApplicationData => {
                conn.pending_record = None;
                return Err(TlsError::bad_message(
                    "application data received during handshake",
                ));
            }

            ContentType::Alert => {
                let payload = conn.pending_record.take().unwrap().payload;
                conn.callbacks.process_alert_fragment(&payload)?;
                // No state change (spec.md §4.3); keep pulling records.
                continue;
            }

            ContentType::ChangeCipherSpec => {
                let pending = conn.pending_record.take().unwrap();
                if pending.payload.len() != 1 {
                    return Err(TlsError::bad_message(
                        "ChangeCipherSpec record payload must be exactly 1 byte",
                    ));
                }
                dispatch_ccs_recv(conn)?;
                conn.commit_transition()?;
                return Ok(ReadIoOutcome::Advanced);
            }

            ContentType::Handshake => {
                let is_sslv2 = conn.pending_record.as_ref().unwrap().is_sslv2;
                if is_sslv2 {
                    if conn.state != HandshakeState::ClientHello {
                        return Err(TlsError::bad_message(
                            "SSLv2 ClientHello is only legal at CLIENT_HELLO",
                        ));
                    }
                    let pending = conn.pending_record.take().unwrap();
                    conn.transcripts.update_all(&pending.sslv2_header);
                    conn.transcripts.update_all(&pending.payload);
                    let next =
                        conn.callbacks.sslv2_client_hello_recv(&pending.payload, &mut conn.fields)?;
                    conn.set_next_state(next);
                    conn.commit_transition()?;
                    return Ok(ReadIoOutcome::Advanced);
                }

                let remaining = conn.pending_record.as_ref().unwrap().remaining().to_vec();
                match conn.reader.feed(&remaining, &mut conn.transcripts)? {
                    FeedOutcome::NeedMore { consumed } => {
                        conn.pending_record.as_mut().unwrap().cursor += consumed;
                        continue;
                    }
                    FeedOutcome::Ready { consumed, message } => {
                        conn.pending_record.as_mut().unwrap().cursor += consumed;
                        let expected = conn.state.action().message_type;
                        if message.message_type != expected {
                            return Err(TlsError::UnexpectedMessageType {
                                state: conn.state,
                                expected,
                                found: message.message_type,
                            });
                        }
                        dispatch_handshake_recv(conn, &message.body)?;
                        conn.commit_transition()?;
                        debug!("read_io: advanced to {:?}", conn.state);
                        return Ok(ReadIoOutcome::Advanced);
                    }
                }
            }
        }
    }
}

/// The read side of one `negotiate` iteration. A handler failure here gets
/// the uniform post-failure delay (spec.md §4.5, §7); write-path failures
/// do not (SPEC_FULL.md §6 Open Question resolution).
fn read_io<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource>(
    conn: &mut Connection<R, CB, Rnd>,
) -> TlsResult<ReadIoOutcome> {
    match process_one_record(conn) {
        Ok(outcome) => Ok(outcome),
        Err(TlsError::Closed) => Err(TlsError::Closed),
        Err(err) => {
            warn!("read_io: handler failure, applying uniform delay: {err}");
            conn.callbacks.sleep_delay();
            Err(err)
        }
    }
}

/// Drives the handshake to completion or to the next suspension point
/// (spec.md §4.5). Re-entrant: a caller that receives `Blocked::OnRead` or
/// `Blocked::OnWrite` should call `negotiate` again once the transport is
/// ready; all state needed to resume lives on `Connection`.
pub fn negotiate<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource>(
    conn: &mut Connection<R, CB, Rnd>,
) -> TlsResult<Blocked> {
    loop {
        if conn.state.action().writer == Writer::Both {
            break;
        }

        match conn.record_layer.flush() {
            Ok(FlushOutcome::WouldBlock) => return Ok(Blocked::OnWrite),
            Ok(FlushOutcome::Flushed) => {}
            Err(err) => {
                conn.closed = true;
                return Err(err);
            }
        }

        let my_turn = conn.state.action().writer.is_mine(conn.fields.mode);
        if my_turn {
            match writer::write_io(conn) {
                Ok(WriteOutcome::WouldBlock) => return Ok(Blocked::OnWrite),
                Ok(WriteOutcome::Continuing | WriteOutcome::Advanced) => {}
                Err(err) => {
                    conn.closed = true;
                    return Err(err);
                }
            }
        } else {
            match read_io(conn) {
                Ok(ReadIoOutcome::WouldBlock) => return Ok(Blocked::OnRead),
                Ok(ReadIoOutcome::Advanced) => {}
                Err(err) => {
                    conn.closed = true;
                    return Err(err);
                }
            }
        }

        if conn.state.action().writer == Writer::Both {
            debug!("negotiate: handshake complete, releasing handshake.io");
            conn.io.wipe();
        }
    }
    Ok(Blocked::NotBlocked)
}
