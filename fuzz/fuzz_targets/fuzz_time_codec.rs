#![no_main]

use cuetimer::time_codec::{format_seconds, parse_time};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Anything that parses must survive a format/parse round trip.
        if let Ok(seconds) = parse_time(text) {
            assert_eq!(parse_time(&format_seconds(seconds)), Ok(seconds));
        }
    }
});
