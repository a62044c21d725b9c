use std::str::FromStr;
use std::sync::Arc;

use apalis::cron::{CronStream, Schedule};
use apalis::prelude::*;
use apalis::utils::TokioExecutor;

use crate::modules::auth;
use crate::types::{Context, CronTick};

pub fn monitor(ctx: Arc<Context>) -> Monitor<TokioExecutor> {
    let schedule = Schedule::from_str(auth::job::SCHEDULE).expect("Couldn't create schedule!");

    let worker = WorkerBuilder::new("wastepickup::auth::job::cleanup")
        .stream(CronStream::new(schedule).into_stream())
        .build_fn(move |_tick: CronTick| {
            let ctx = ctx.clone();
            async move { auth::job::cleanup(ctx).await }
        });

    Monitor::<TokioExecutor>::new().register_with_count(1, worker)
}
