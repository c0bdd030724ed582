//! Fuzz target: `ir::decode`
//!
//! Builds a pulse train from arbitrary bytes and asserts that the decoder
//! never panics, that reported error positions lie inside the train, and
//! that anything it does accept survives a clean re-encode.
//!
//! Each input byte picks a pair: the low two bits choose one of the
//! protocol's four pairs, so most trains get past the header; a set high
//! bit stretches the space to an arbitrary width instead.
//!
//! cargo fuzz run fuzz_pulse_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use panafan::error::DecodeError;
use panafan::ir::{Pulse, PulseTrain, decode, encode};

const PALETTE: [Pulse; 4] = [Pulse::HEADER, Pulse::ONE, Pulse::ZERO, Pulse::FRAME_END];

fuzz_target!(|data: &[u8]| {
    let train: PulseTrain = data
        .iter()
        .map(|&b| {
            let base = PALETTE[usize::from(b & 0x03)];
            if b & 0x80 != 0 {
                Pulse::new(base.mark_us, u32::from(b) * 97)
            } else {
                base
            }
        })
        .collect();

    match decode(&train) {
        Ok(bytes) => {
            assert_eq!(decode(encode(&bytes)).as_deref(), Ok(bytes.as_slice()));
        }
        Err(DecodeError::InvalidHeader { at }) => {
            assert!(at <= train.len(), "header index past end of train");
        }
        Err(DecodeError::InvalidBit { bit, at, .. }) => {
            assert!(bit < 8);
            assert!(at <= train.len(), "bit index past end of train");
        }
    }
});
