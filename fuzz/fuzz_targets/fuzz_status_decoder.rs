//! Fuzz target: `status::decode_status`
//!
//! Any two bytes must decode to a valid state, and the button bits and the
//! unused high-byte bits must never change the result.
//!
//! cargo fuzz run fuzz_status_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use panafan::status::decode_status;

fuzz_target!(|data: [u8; 2]| {
    let state = decode_status(data);
    let masked = [data[0] | 0x03, data[1] | 0x7F];
    assert_eq!(state, decode_status(masked));
});
