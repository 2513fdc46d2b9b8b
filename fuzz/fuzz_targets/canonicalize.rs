// SPDX-License-Identifier: Apache-2.0

#![no_main]

use hgkeyring_core::{UrlCredentials, canonicalize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let url = canonicalize(raw);
        assert!(!url.as_str().contains(['?', '#']));
        assert_eq!(canonicalize(url.as_str()), url);
        let _ = UrlCredentials::from_uri(raw);
    }
});
