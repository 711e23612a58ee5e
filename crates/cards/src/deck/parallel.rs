// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand sampling.
use rand::prelude::*;
use std::thread;

use super::{Card, Deck};

impl Deck {
    /// Calls the given closure from `num_tasks` parallel tasks generating
    /// `samples` k-cards draws in total.
    ///
    /// The closure takes an usize that is the task identifier (0..num_task) and
    /// a slice of k distinct cards in random order. Samples are split evenly
    /// between tasks, with the first `samples % num_tasks` tasks taking one
    /// extra sample. Each task uses its own rng seeded with `seed + task_id`
    /// when a seed is given, or from the OS otherwise.
    ///
    /// Panics if num_tasks is zero.
    pub fn par_sample<F>(&self, num_tasks: usize, samples: usize, k: usize, seed: Option<u64>, f: F)
    where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        assert!(num_tasks > 0);

        if k > self.cards.len() {
            return;
        }

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let task_samples = samples / num_tasks + usize::from(task_id < samples % num_tasks);
                if task_samples == 0 {
                    continue;
                }

                let f = &f;
                s.spawn(move || {
                    let mut rng = match seed {
                        Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(task_id as u64)),
                        None => SmallRng::from_os_rng(),
                    };

                    self.sample(&mut rng, task_samples, k, |draw| f(task_id, draw));
                });
            }
        });
    }
}
