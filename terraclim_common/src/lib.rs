/*
 * Copyright © 2025, TerraCLIM client contributors. All rights reserved.
 *
 * The “TerraCLIM client” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! domain agnostic utilities shared by TerraCLIM crates: error definition macros,
//! date normalization and a (blocking) HTTP connector abstraction

pub mod macros;
pub mod datetime;
pub mod net;

/// abbreviate a (secret) string for display purposes. Returns "None" for missing values
pub fn abbreviate (s: Option<&str>, max_chars: usize)->String {
    match s {
        Some(s) if !s.is_empty() => {
            let prefix: String = s.chars().take(max_chars).collect();
            format!("{prefix}...")
        }
        _ => "None".to_string()
    }
}
