//! Outbound codec for tokio.
//!
//! [`WireCodec`] lets an [`Outbound`] stream be written through a
//! `tokio_util::codec::FramedWrite` sink. Inbound bytes go through
//! [`LineFramer`](crate::line::LineFramer) instead, which keeps the
//! fixed-buffer truncation policy a general `Decoder` would not.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::command::Outbound;
use crate::encode::IrcEncode;
use crate::error;

/// Encoder writing commands in their wire form.
#[derive(Clone, Copy, Debug, Default)]
pub struct WireCodec;

impl WireCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<Outbound> for WireCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: Outbound, dst: &mut BytesMut) -> error::Result<()> {
        let mut writer = dst.writer();
        msg.encode(&mut writer)?;
        Ok(())
    }
}
