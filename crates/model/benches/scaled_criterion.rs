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

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use treasury_model::{
    enums::RoundingMode,
    principal::{AllocationOptions, allocate},
    types::fixed::{ScaledInt, from_scaled_to_f64, from_scaled_to_string, to_scaled},
};

pub fn bench_to_scaled(c: &mut Criterion) {
    c.bench_function("to_scaled_half_away_from_zero", |b| {
        b.iter(|| to_scaled(black_box(10.075), black_box(2), RoundingMode::HalfAwayFromZero));
    });
    c.bench_function("to_scaled_truncate", |b| {
        b.iter(|| to_scaled(black_box(-1234.56789), black_box(4), RoundingMode::Truncate));
    });
}

pub fn bench_from_scaled(c: &mut Criterion) {
    let positive = ScaledInt::from(3_313_334);
    let negative = ScaledInt::from(-3_313_334);

    c.bench_function("from_scaled_to_f64", |b| {
        b.iter(|| from_scaled_to_f64(black_box(&positive), black_box(4)));
    });
    c.bench_function("from_scaled_to_string", |b| {
        b.iter(|| from_scaled_to_string(black_box(&negative), black_box(4)));
    });
}

pub fn bench_allocate(c: &mut Criterion) {
    // Monthly schedule over ten years, unsorted, with a residual to redistribute
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..120)
        .rev()
        .map(|i| start + chrono::Months::new(i))
        .collect();
    let amounts = vec![100.0; dates.len()];
    let options = AllocationOptions::default();

    c.bench_function("allocate_120_redistributed", |b| {
        b.iter(|| {
            allocate(
                black_box(13_000.0),
                black_box(7.5),
                black_box(&amounts),
                black_box(&dates),
                &options,
            )
        });
    });
}

criterion_group!(benches, bench_to_scaled, bench_from_scaled, bench_allocate);
criterion_main!(benches);
