//! The ServerHello codec (spec.md §4.2) — the one fully in-scope
//! per-message encoder/decoder, representative of the shape every
//! handshake message takes: version negotiation, random construction,
//! cipher selection, extensions.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::connection::{Connection, SignatureDigestAlg};
use crate::core::errors::{TlsError, TlsResult};
use crate::core::handshake::callbacks::HandshakeCallbacks;
use crate::core::random::RandomSource;
use crate::core::record::types::RecordLayer;
use crate::core::state::{msg_type, HandshakeState};
use crate::core::version;
use crate::core::wire::Cursor;

/// Our highest supported protocol version. Fixed: this driver targets
/// TLS 1.0/1.1/1.2 only (spec.md §1 non-goals exclude TLS 1.3).
pub const SUPPORTED_MAX_VERSION: u8 = version::TLS_1_2;

fn signature_digest_alg_for(actual_version: u8) -> SignatureDigestAlg {
    if actual_version == version::TLS_1_2 {
        SignatureDigestAlg::Sha1
    } else {
        SignatureDigestAlg::Md5Sha1
    }
}

fn gmt_unix_time_be() -> [u8; 4] {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    (secs as u32).to_be_bytes()
}

/// Builds a fresh 32-byte server random: 4 bytes GMT Unix time followed by
/// 28 cryptographically strong random bytes.
fn build_server_random<Rnd: RandomSource>(random: &mut Rnd) -> TlsResult<[u8; 32]> {
    let mut out = [0u8; 32];
    out[..4].copy_from_slice(&gmt_unix_time_be());
    random.fill(&mut out[4..])?;
    Ok(out)
}

pub fn send<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource>(
    conn: &mut Connection<R, CB, Rnd>,
) -> TlsResult<()> {
    let server_random = build_server_random(&mut conn.random)?;

    // Downgrade to the peer's offered version if it's below ours.
    let actual = if conn.fields.client_protocol_version < SUPPORTED_MAX_VERSION {
        conn.fields.client_protocol_version
    } else {
        SUPPORTED_MAX_VERSION
    };
    conn.fields.actual_protocol_version = actual;
    conn.fields.actual_protocol_version_established = true;
    conn.fields.pending.server_random = server_random;
    conn.fields.pending.signature_digest_alg = signature_digest_alg_for(actual);

    let (major, minor) = version::to_wire(actual);
    conn.io.reserve_header();
    conn.io.append(&[major, minor]);
    conn.io.append(&server_random);
    conn.io.append(&[0u8]); // session_id_len = 0, no session id bytes follow
    let cipher_suite = conn.fields.pending.cipher_suite;
    conn.io.append(&cipher_suite.to_be_bytes());
    conn.io.append(&[0u8]); // compression method: NULL

    let mut extensions = Vec::new();
    conn.callbacks.server_extensions_send(&mut extensions, &mut conn.fields)?;
    if !extensions.is_empty() {
        conn.io.append(&(extensions.len() as u16).to_be_bytes());
        conn.io.append(&extensions);
    }

    conn.io.patch_header(msg_type::SERVER_HELLO);
    conn.set_next_state(HandshakeState::ServerCert);
    Ok(())
}

pub fn recv<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource>(
    conn: &mut Connection<R, CB, Rnd>,
    body: &[u8],
) -> TlsResult<()> {
    let mut cursor = Cursor::new(body);

    let major = cursor.read_u8()?;
    let minor = cursor.read_u8()?;
    let server_version = version::to_internal(major, minor);
    if server_version > SUPPORTED_MAX_VERSION {
        return Err(TlsError::bad_message(
            "ServerHello version exceeds locally supported maximum",
        ));
    }
    conn.fields.actual_protocol_version = server_version;
    conn.fields.actual_protocol_version_established = true;
    if !version::is_supported(conn.fields.actual_protocol_version) {
        return Err(TlsError::bad_message("ServerHello version outside [SSLv3, TLS1.2]"));
    }
    conn.fields.pending.signature_digest_alg = signature_digest_alg_for(server_version);

    let server_random: [u8; 32] = cursor
        .read_bytes(32)?
        .try_into()
        .expect("read_bytes(32) returns a 32-byte slice");
    conn.fields.pending.server_random = server_random;

    let session_id_len = cursor.read_u8()? as usize;
    if session_id_len > 32 {
        return Err(TlsError::bad_message("session_id_len exceeds 32"));
    }
    cursor.skip(session_id_len)?;

    let cipher_suite = cursor.read_u16()?;
    conn.callbacks.set_cipher_as_client(cipher_suite, &mut conn.fields)?;
    conn.fields.pending.cipher_suite = cipher_suite;

    let compression_method = cursor.read_u8()?;
    if compression_method != 0 {
        return Err(TlsError::bad_message("compression method must be NULL (0)"));
    }

    if cursor.remaining() >= 2 {
        let extensions_size = cursor.read_u16()? as usize;
        if extensions_size > cursor.remaining() {
            return Err(TlsError::bad_message("extensions_size exceeds remaining body"));
        }
        let extensions = cursor.read_bytes(extensions_size)?;
        conn.callbacks.server_extensions_recv(extensions, &mut conn.fields)?;
    }

    conn.set_next_state(HandshakeState::ServerCert);
    Ok(())
}
