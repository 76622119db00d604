// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! The driver repository: dated simulation inputs keyed by scenario, unit and name.
//!
//! Values are written in batches with [`DriversRepo::set`] and read as of a calendar day with
//! [`DriversRepo::get`]. A name prefix decides whether a driver can be overwritten:
//!
//! | Prefix (default) | Kind                      | Write rule                               |
//! |------------------|---------------------------|------------------------------------------|
//! | `$$`             | immutable, without dates  | one undated sample, written once         |
//! | `$`              | immutable, with dates     | one sample per date, within one batch    |
//! | none             | mutable                   | overwritten per date, if allowed         |

pub mod config;
pub mod error;
pub mod key;
pub mod repo;

use std::sync::{Arc, RwLock};

// Re-exports
pub use self::{
    config::{DriverAggregate, DriversRepoConfig, ValueSanitization},
    error::DriverError,
    key::{DriverKey, Mutability},
    repo::{DriverInput, DriverQuery, DriverSample, DriversRepo},
};

/// A [`DriversRepo`] shared between threads; `set` takes the write lock.
pub type SharedDriversRepo = Arc<RwLock<DriversRepo>>;

/// Wraps `repo` for sharing between threads.
#[must_use]
pub fn shared(repo: DriversRepo) -> SharedDriversRepo {
    Arc::new(RwLock::new(repo))
}

#[cfg(test)]
mod tests {
    use std::thread;

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn test_shared_repo_across_threads() {
        let repo = shared(
            DriversRepo::new(DriversRepoConfig {
                allow_mutable: true,
                ..Default::default()
            })
            .unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    let name = format!("$$driver {i}");
                    let errors = repo.write().unwrap().set(&[DriverInput::new(&name, i)]).unwrap();
                    assert!(errors.is_empty());
                    repo.read().unwrap().get(&DriverQuery::new(&name)).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(json!(i)));
        }
        assert_eq!(repo.read().unwrap().len(), 4);
    }
}
