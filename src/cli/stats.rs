use reqwest::StatusCode;
use tabled::Table;

use crate::{
    error, info,
    types::{Entity, StatsRange},
    utils,
};

use super::{client, spinner};

pub async fn stats(user: String, entity: Entity, range: StatsRange, count: Option<u32>) {
    let pb = spinner(format!("Fetching top {}s of {}...", entity, user));
    let result = client().user_entity(&user, entity, range, 0, count).await;
    pb.finish_and_clear();

    let payload = match result {
        Ok(p) => p,
        Err(e) if e.status() == Some(StatusCode::NO_CONTENT) => {
            info!("Statistics for {} have not been calculated yet.", user);
            return;
        }
        Err(e) => error!("Cannot fetch statistics. Err: {}", e),
    };

    let stats = payload.entities(entity);
    if stats.is_empty() {
        info!("No {} statistics for {} ({}).", entity, user, range);
        return;
    }

    info!(
        "Top {}s of {} ({}), {} in total",
        entity,
        user,
        range,
        payload
            .total(entity)
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".to_string())
    );
    println!("{}", Table::new(utils::stat_rows(entity, stats, payload.offset)));
}
