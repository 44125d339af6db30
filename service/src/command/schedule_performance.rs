//! [`Command`] for scheduling a new [`Performance`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{performance, play, theatre_hall, Performance, Play, TheatreHall},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for scheduling a new [`Performance`] of a [`Play`] in a
/// [`TheatreHall`].
#[derive(Clone, Copy, Debug)]
pub struct SchedulePerformance {
    /// ID of the [`Play`] to show.
    pub play_id: play::Id,

    /// ID of the [`TheatreHall`] hosting a new [`Performance`].
    pub theatre_hall_id: theatre_hall::Id,

    /// [`performance::ShowTime`] of a new [`Performance`].
    pub show_time: performance::ShowTime,
}

impl<Db> Command<SchedulePerformance> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Play>, play::Id>>,
            Ok = Option<Play>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<TheatreHall>, theatre_hall::Id>>,
            Ok = Option<TheatreHall>,
            Err = Traced<database::Error>,
        > + Database<Insert<Performance>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Performance;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SchedulePerformance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SchedulePerformance {
            play_id,
            theatre_hall_id,
            show_time,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        _ = tx
            .execute(Select(By::<Option<Play>, _>::new(play_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PlayNotExists(play_id))
            .map_err(tracerr::wrap!())?;
        _ = tx
            .execute(Select(By::<Option<TheatreHall>, _>::new(
                theatre_hall_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TheatreHallNotExists(theatre_hall_id))
            .map_err(tracerr::wrap!())?;

        let performance = Performance {
            id: performance::Id::new(),
            play_id,
            theatre_hall_id,
            show_time,
        };
        tx.execute(Insert(performance))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            performance_id = %performance.id,
            %play_id,
            %theatre_hall_id,
            "performance scheduled",
        );

        Ok(performance)
    }
}

/// Error of [`SchedulePerformance`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Play`] with the provided ID does not exist.
    #[display("`Play(id: {_0})` does not exist")]
    PlayNotExists(#[error(not(source))] play::Id),

    /// [`TheatreHall`] with the provided ID does not exist.
    #[display("`TheatreHall(id: {_0})` does not exist")]
    TheatreHallNotExists(#[error(not(source))] theatre_hall::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{Date, DateTime};

    use crate::{
        domain::{play, theatre_hall},
        fixture, query, read, Command as _, Query as _,
    };

    use super::{ExecutionError, SchedulePerformance};

    #[tokio::test]
    async fn lists_performances_of_day() {
        let svc = fixture::service();
        let hall = fixture::hall(&svc, 4, 5).await;
        let play = fixture::play(&svc).await;
        let day = Date::from_calendar_date(2024, 3, 1).unwrap();
        for hours in [19, 12, 30] {
            let _ = svc
                .execute(SchedulePerformance {
                    play_id: play.id,
                    theatre_hall_id: hall.id,
                    show_time: day.start()
                        + Duration::from_secs(hours * 60 * 60),
                })
                .await
                .unwrap();
        }

        let items = svc
            .execute(query::performances::List::by(
                read::performance::list::Filter {
                    date: Some(day),
                    play_id: None,
                },
            ))
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert!(items[0].show_time < items[1].show_time);
        assert!(items
            .iter()
            .all(|i| u32::from(i.tickets_available) == 20));
        assert_eq!(items[0].play_title, play.title);
        assert_eq!(items[0].theatre_hall_name, hall.name);
    }

    #[tokio::test]
    async fn fails_for_missing_references() {
        let svc = fixture::service();
        let hall = fixture::hall(&svc, 1, 1).await;
        let play = fixture::play(&svc).await;

        let err = svc
            .execute(SchedulePerformance {
                play_id: play::Id::new(),
                theatre_hall_id: hall.id,
                show_time: DateTime::now().coerce(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::PlayNotExists(_)));

        let err = svc
            .execute(SchedulePerformance {
                play_id: play.id,
                theatre_hall_id: theatre_hall::Id::new(),
                show_time: DateTime::now().coerce(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::TheatreHallNotExists(_),
        ));
    }
}
