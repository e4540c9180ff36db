// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! File-picker option assembly.
//!
//! [`open_file_options`] and [`save_file_options`] build plain-data option
//! sets from toolkit filter strings; these are what the tests exercise. On
//! wasm32 the [`to_js`](OpenFileOptions::to_js) methods mirror them onto
//! the JS objects `showOpenFilePicker` / `showSaveFilePicker` expect, which
//! the host hands to the browser verbatim.

use crate::filters::{FilterType, filter_list_to_types};

/// Options for `showOpenFilePicker`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenFileOptions {
    /// Accept groups; empty means "no filter restriction" and the `types`
    /// key is omitted from the JS object.
    pub types: Vec<FilterType>,
    /// Whether selecting multiple files is allowed.
    pub multiple: bool,
}

/// Options for `showSaveFilePicker`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveFileOptions {
    /// Accept groups; empty means "no filter restriction".
    pub types: Vec<FilterType>,
    /// Suggested file name; empty means "no suggestion" and the key is
    /// omitted.
    pub suggested_name: String,
}

/// Builds open-dialog options from a filter list.
pub fn open_file_options<I, F>(filters: I, accept_multiple: bool) -> OpenFileOptions
where
    I: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    OpenFileOptions {
        types: filter_list_to_types(filters),
        multiple: accept_multiple,
    }
}

/// Builds save-dialog options from a filter list and a suggested name.
pub fn save_file_options<I, F>(filters: I, suggested_name: &str) -> SaveFileOptions
where
    I: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    SaveFileOptions {
        types: filter_list_to_types(filters),
        suggested_name: suggested_name.to_owned(),
    }
}

#[cfg(target_arch = "wasm32")]
mod js {
    use js_sys::{Array, Object, Reflect};
    use wasm_bindgen::JsValue;

    use super::{OpenFileOptions, SaveFileOptions};
    use crate::filters::FilterType;

    /// The accept map requires *some* MIME key; the picker appears to
    /// ignore it and match purely on the suffix list, but the browser API
    /// contract has not dropped the key, so neither do we.
    const ACCEPT_MIME_KEY: &str = "application/octet-stream";

    fn set(target: &Object, key: &str, value: &JsValue) {
        // Reflect::set only fails on non-objects; `target` is always one.
        let _ = Reflect::set(target, &JsValue::from_str(key), value);
    }

    fn type_list(types: &[FilterType]) -> Array {
        types
            .iter()
            .map(|filter| {
                let accept = Object::new();
                let suffixes: Array = filter
                    .extensions
                    .iter()
                    .map(|suffix| JsValue::from_str(suffix))
                    .collect();
                set(&accept, ACCEPT_MIME_KEY, &suffixes);

                let entry = Object::new();
                set(
                    &entry,
                    "description",
                    &JsValue::from_str(&filter.description),
                );
                set(&entry, "accept", &accept);
                JsValue::from(entry)
            })
            .collect()
    }

    impl OpenFileOptions {
        /// Mirrors these options onto the object `showOpenFilePicker`
        /// expects.
        #[must_use]
        pub fn to_js(&self) -> Object {
            let options = Object::new();
            if !self.types.is_empty() {
                set(&options, "types", &type_list(&self.types));
                set(&options, "excludeAcceptAllOption", &JsValue::TRUE);
            }
            set(&options, "multiple", &JsValue::from_bool(self.multiple));
            options
        }
    }

    impl SaveFileOptions {
        /// Mirrors these options onto the object `showSaveFilePicker`
        /// expects.
        #[must_use]
        pub fn to_js(&self) -> Object {
            let options = Object::new();
            if !self.suggested_name.is_empty() {
                set(
                    &options,
                    "suggestedName",
                    &JsValue::from_str(&self.suggested_name),
                );
            }
            if !self.types.is_empty() {
                set(&options, "types", &type_list(&self.types));
            }
            options
        }
    }
}
