//! [`Database`] implementations of the [`Memory`] client.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{
        actor, genre, performance, play, reservation, theatre_hall, user,
        Actor, Genre, Performance, Play, Reservation, Seat, TheatreHall,
        Ticket,
    },
    infra::{database, Database},
    read,
};

use super::{Error, Memory, State, Storage};

/// Selects the values with the provided IDs out of the `source`.
fn pick<Id, T>(source: &HashMap<Id, T>, ids: &[Id]) -> HashMap<Id, T>
where
    Id: Copy + Eq + std::hash::Hash,
    T: Clone,
{
    ids.iter()
        .filter_map(|id| source.get(id).map(|v| (*id, v.clone())))
        .collect()
}

/// Indicates whether the `haystack` contains the `needle` ignoring case.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl<C: Storage> Database<Insert<Actor>> for Memory<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(actor): Insert<Actor>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            drop(s.actors.insert(actor.id, actor));
            Ok(())
        })
        .await
    }
}

impl<C, IDs> Database<Select<By<HashMap<actor::Id, Actor>, IDs>>> for Memory<C>
where
    C: Storage,
    IDs: AsRef<[actor::Id]>,
{
    type Ok = HashMap<actor::Id, Actor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<actor::Id, Actor>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        self.with(|s| Ok(pick(&s.actors, ids.as_ref()))).await
    }
}

impl<C: Storage> Database<Select<By<Option<Actor>, actor::Id>>> for Memory<C> {
    type Ok = Option<Actor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Actor>, actor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| Ok(s.actors.get(&id).cloned())).await
    }
}

impl<C: Storage> Database<Select<By<Vec<Actor>, ()>>> for Memory<C> {
    type Ok = Vec<Actor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Actor>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            let mut actors = s.actors.values().cloned().collect::<Vec<_>>();
            actors.sort_by(|a, b| {
                (&a.last_name, &a.first_name)
                    .cmp(&(&b.last_name, &b.first_name))
            });
            Ok(actors)
        })
        .await
    }
}

impl<C: Storage> Database<Insert<Genre>> for Memory<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(genre): Insert<Genre>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            drop(s.genres.insert(genre.id, genre));
            Ok(())
        })
        .await
    }
}

impl<C, IDs> Database<Select<By<HashMap<genre::Id, Genre>, IDs>>> for Memory<C>
where
    C: Storage,
    IDs: AsRef<[genre::Id]>,
{
    type Ok = HashMap<genre::Id, Genre>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<genre::Id, Genre>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        self.with(|s| Ok(pick(&s.genres, ids.as_ref()))).await
    }
}

impl<C: Storage> Database<Select<By<Option<Genre>, genre::Id>>> for Memory<C> {
    type Ok = Option<Genre>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Genre>, genre::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| Ok(s.genres.get(&id).cloned())).await
    }
}

impl<C: Storage> Database<Select<By<Vec<Genre>, read::genre::list::Filter>>>
    for Memory<C>
{
    type Ok = Vec<Genre>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Genre>, read::genre::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::genre::list::Filter { name } = by.into_inner();
        self.with(|s| {
            let mut genres = s
                .genres
                .values()
                .filter(|g| {
                    name.as_deref().map_or(true, |n| {
                        contains_ignore_case(g.name.as_ref(), n)
                    })
                })
                .cloned()
                .collect::<Vec<_>>();
            genres.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(genres)
        })
        .await
    }
}

impl<C: Storage> Database<Insert<Play>> for Memory<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(play): Insert<Play>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            if !play.actors.iter().all(|id| s.actors.contains_key(id)) {
                return Err(Error::ForeignKeyViolation(
                    "play_actors_actor_id_fkey",
                ));
            }
            if !play.genres.iter().all(|id| s.genres.contains_key(id)) {
                return Err(Error::ForeignKeyViolation(
                    "play_genres_genre_id_fkey",
                ));
            }
            drop(s.plays.insert(play.id, play));
            Ok(())
        })
        .await
    }
}

impl<C, IDs> Database<Select<By<HashMap<play::Id, Play>, IDs>>> for Memory<C>
where
    C: Storage,
    IDs: AsRef<[play::Id]>,
{
    type Ok = HashMap<play::Id, Play>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<play::Id, Play>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        self.with(|s| Ok(pick(&s.plays, ids.as_ref()))).await
    }
}

impl<C: Storage> Database<Select<By<Option<Play>, play::Id>>> for Memory<C> {
    type Ok = Option<Play>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Play>, play::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| Ok(s.plays.get(&id).cloned())).await
    }
}

impl<C: Storage> Database<Select<By<Vec<Play>, read::play::list::Filter>>>
    for Memory<C>
{
    type Ok = Vec<Play>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Play>, read::play::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::play::list::Filter {
            title,
            actors,
            genres,
        } = by.into_inner();
        self.with(|s| {
            let mut plays = s
                .plays
                .values()
                .filter(|p| {
                    title.as_deref().map_or(true, |t| {
                        contains_ignore_case(p.title.as_ref(), t)
                    })
                })
                .filter(|p| {
                    actors.is_empty()
                        || p.actors.iter().any(|id| actors.contains(id))
                })
                .filter(|p| {
                    genres.is_empty()
                        || p.genres.iter().any(|id| genres.contains(id))
                })
                .cloned()
                .collect::<Vec<_>>();
            plays.sort_by(|a, b| a.title.cmp(&b.title));
            Ok(plays)
        })
        .await
    }
}

impl<C: Storage> Database<Delete<By<Play, play::Id>>> for Memory<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Play, play::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            s.remove_play(id);
            Ok(())
        })
        .await
    }
}

impl<C: Storage> Database<Insert<TheatreHall>> for Memory<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(hall): Insert<TheatreHall>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            drop(s.theatre_halls.insert(hall.id, hall));
            Ok(())
        })
        .await
    }
}

impl<C: Storage> Database<Update<TheatreHall>> for Memory<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(hall): Update<TheatreHall>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            if let Some(existing) = s.theatre_halls.get_mut(&hall.id) {
                *existing = hall;
            }
            Ok(())
        })
        .await
    }
}

impl<C, IDs> Database<Select<By<HashMap<theatre_hall::Id, TheatreHall>, IDs>>>
    for Memory<C>
where
    C: Storage,
    IDs: AsRef<[theatre_hall::Id]>,
{
    type Ok = HashMap<theatre_hall::Id, TheatreHall>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<theatre_hall::Id, TheatreHall>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        self.with(|s| Ok(pick(&s.theatre_halls, ids.as_ref()))).await
    }
}

impl<C: Storage> Database<Select<By<Option<TheatreHall>, theatre_hall::Id>>>
    for Memory<C>
{
    type Ok = Option<TheatreHall>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<TheatreHall>, theatre_hall::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| Ok(s.theatre_halls.get(&id).cloned())).await
    }
}

impl<C: Storage> Database<Select<By<Vec<TheatreHall>, ()>>> for Memory<C> {
    type Ok = Vec<TheatreHall>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<TheatreHall>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            let mut halls =
                s.theatre_halls.values().cloned().collect::<Vec<_>>();
            halls.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(halls)
        })
        .await
    }
}

impl<C: Storage> Database<Lock<By<TheatreHall, theatre_hall::Id>>>
    for Memory<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<TheatreHall, theatre_hall::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Transactions are exclusive already.
        Ok(())
    }
}

impl<C: Storage>
    Database<Select<By<read::theatre_hall::HasSoldTickets, theatre_hall::Id>>>
    for Memory<C>
{
    type Ok = read::theatre_hall::HasSoldTickets;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::theatre_hall::HasSoldTickets, theatre_hall::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            Ok(read::theatre_hall::HasSoldTickets(s.tickets.keys().any(
                |(performance_id, _)| {
                    s.performances
                        .get(performance_id)
                        .is_some_and(|p| p.theatre_hall_id == id)
                },
            )))
        })
        .await
    }
}

impl<C: Storage> Database<Delete<By<TheatreHall, theatre_hall::Id>>>
    for Memory<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<TheatreHall, theatre_hall::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            s.remove_theatre_hall(id);
            Ok(())
        })
        .await
    }
}

/// Checks that the [`Play`] and the [`TheatreHall`] of the provided
/// [`Performance`] exist.
fn check_performance_refs(s: &State, p: &Performance) -> Result<(), Error> {
    if !s.plays.contains_key(&p.play_id) {
        return Err(Error::ForeignKeyViolation("performances_play_id_fkey"));
    }
    if !s.theatre_halls.contains_key(&p.theatre_hall_id) {
        return Err(Error::ForeignKeyViolation(
            "performances_theatre_hall_id_fkey",
        ));
    }
    Ok(())
}

impl<C: Storage> Database<Insert<Performance>> for Memory<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(performance): Insert<Performance>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            check_performance_refs(s, &performance)?;
            drop(s.performances.insert(performance.id, performance));
            Ok(())
        })
        .await
    }
}

impl<C: Storage> Database<Update<Performance>> for Memory<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(performance): Update<Performance>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            check_performance_refs(s, &performance)?;
            if let Some(existing) = s.performances.get_mut(&performance.id) {
                *existing = performance;
            }
            Ok(())
        })
        .await
    }
}

impl<C: Storage> Database<Select<By<Option<Performance>, performance::Id>>>
    for Memory<C>
{
    type Ok = Option<Performance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Performance>, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| Ok(s.performances.get(&id).copied())).await
    }
}

impl<C: Storage> Database<Lock<By<Performance, performance::Id>>>
    for Memory<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Performance, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Transactions are exclusive already.
        Ok(())
    }
}

impl<C: Storage> Database<Delete<By<Performance, performance::Id>>>
    for Memory<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Performance, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            s.remove_performances(|p| p.id == id);
            Ok(())
        })
        .await
    }
}

/// Returns the [`read::Seating`] of the [`Performance`] with the provided ID.
fn seating(s: &State, id: performance::Id) -> Option<read::Seating> {
    let performance = s.performances.get(&id)?;
    let hall = s.theatre_halls.get(&performance.theatre_hall_id)?;
    Some(read::Seating {
        performance_id: performance.id,
        theatre_hall_id: hall.id,
        geometry: hall.geometry,
    })
}

/// Counts the [`Ticket`]s sold for the [`Performance`] with the provided ID.
fn sold(s: &State, id: performance::Id) -> u32 {
    let count = s.tickets.keys().filter(|(p, _)| *p == id).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

impl<C: Storage>
    Database<Select<By<Option<read::Seating>, performance::Id>>>
    for Memory<C>
{
    type Ok = Option<read::Seating>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::Seating>, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| Ok(seating(s, id))).await
    }
}

impl<C: Storage>
    Database<
        Select<By<Option<read::performance::AvailableCount>, performance::Id>>,
    > for Memory<C>
{
    type Ok = Option<read::performance::AvailableCount>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<read::performance::AvailableCount>, performance::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            Ok(seating(s, id).map(|seating| {
                read::performance::AvailableCount::new(
                    seating.geometry.capacity(),
                    sold(s, id),
                )
            }))
        })
        .await
    }
}

impl<C: Storage>
    Database<Select<By<read::performance::TakenSeats, performance::Id>>>
    for Memory<C>
{
    type Ok = read::performance::TakenSeats;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::performance::TakenSeats, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            Ok(s.tickets
                .keys()
                .filter(|(p, _)| *p == id)
                .map(|(_, seat)| *seat)
                .collect())
        })
        .await
    }
}

impl<C: Storage>
    Database<Select<By<read::performance::HasTickets, performance::Id>>>
    for Memory<C>
{
    type Ok = read::performance::HasTickets;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::performance::HasTickets, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            Ok(read::performance::HasTickets(
                s.tickets.keys().any(|(p, _)| *p == id),
            ))
        })
        .await
    }
}

impl<C: Storage>
    Database<
        Select<
            By<
                Vec<read::performance::list::Item>,
                read::performance::list::Filter,
            >,
        >,
    > for Memory<C>
{
    type Ok = Vec<read::performance::list::Item>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                Vec<read::performance::list::Item>,
                read::performance::list::Filter,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::performance::list::Filter { date, play_id } =
            by.into_inner();
        let bounds: Option<(performance::ShowTime, performance::ShowTime)> =
            date.map(|d| (d.start(), d.end()));
        self.with(|s| {
            let mut performances = s
                .performances
                .values()
                .filter(|p| play_id.map_or(true, |id| p.play_id == id))
                .filter(|p| {
                    bounds.map_or(true, |(start, end)| {
                        p.show_time >= start && p.show_time < end
                    })
                })
                .collect::<Vec<_>>();
            performances.sort_by_key(|p| (p.show_time, p.id.to_string()));
            Ok(performances
                .into_iter()
                .filter_map(|p| {
                    let play = s.plays.get(&p.play_id)?;
                    let hall = s.theatre_halls.get(&p.theatre_hall_id)?;
                    Some(read::performance::list::Item {
                        id: p.id,
                        play_title: play.title.clone(),
                        theatre_hall_name: hall.name.clone(),
                        show_time: p.show_time,
                        tickets_available:
                            read::performance::AvailableCount::new(
                                hall.geometry.capacity(),
                                sold(s, p.id),
                            ),
                    })
                })
                .collect())
        })
        .await
    }
}

impl<C: Storage> Database<Insert<Ticket>> for Memory<C> {
    type Ok = read::ticket::IsInserted;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(ticket): Insert<Ticket>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            if !s.performances.contains_key(&ticket.performance_id) {
                return Err(Error::ForeignKeyViolation(
                    "tickets_performance_id_fkey",
                ));
            }
            if !s.reservations.contains_key(&ticket.reservation_id) {
                return Err(Error::ForeignKeyViolation(
                    "tickets_reservation_id_fkey",
                ));
            }
            let key = (ticket.performance_id, ticket.seat);
            if s.tickets.contains_key(&key) {
                return Ok(read::ticket::IsInserted(false));
            }
            drop(s.tickets.insert(key, ticket));
            Ok(read::ticket::IsInserted(true))
        })
        .await
    }
}

impl<C: Storage>
    Database<Select<By<read::ticket::IsTaken, (performance::Id, Seat)>>>
    for Memory<C>
{
    type Ok = read::ticket::IsTaken;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::ticket::IsTaken, (performance::Id, Seat)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();
        self.with(|s| Ok(read::ticket::IsTaken(s.tickets.contains_key(&key))))
            .await
    }
}

impl<C: Storage> Database<Select<By<Vec<Ticket>, reservation::Id>>>
    for Memory<C>
{
    type Ok = Vec<Ticket>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Ticket>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            let mut tickets = s
                .tickets
                .values()
                .filter(|t| t.reservation_id == id)
                .copied()
                .collect::<Vec<_>>();
            tickets.sort_by_key(|t| t.seat);
            Ok(tickets)
        })
        .await
    }
}

impl<C: Storage> Database<Insert<Reservation>> for Memory<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reservation): Insert<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            drop(s.reservations.insert(reservation.id, reservation));
            Ok(())
        })
        .await
    }
}

impl<C: Storage> Database<Select<By<Option<Reservation>, reservation::Id>>>
    for Memory<C>
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| Ok(s.reservations.get(&id).copied())).await
    }
}

impl<C: Storage> Database<Select<By<Vec<Reservation>, user::Id>>>
    for Memory<C>
{
    type Ok = Vec<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Reservation>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        self.with(|s| {
            let mut reservations = s
                .reservations
                .values()
                .filter(|r| r.user_id == user_id)
                .copied()
                .collect::<Vec<_>>();
            reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(reservations)
        })
        .await
    }
}

impl<C: Storage>
    Database<Select<By<read::reservation::TicketCount, reservation::Id>>>
    for Memory<C>
{
    type Ok = read::reservation::TicketCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::reservation::TicketCount, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            let count =
                s.tickets.values().filter(|t| t.reservation_id == id).count();
            Ok(u32::try_from(count).unwrap_or(u32::MAX).into())
        })
        .await
    }
}

impl<C: Storage> Database<Delete<By<Reservation, reservation::Id>>>
    for Memory<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Reservation, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            s.remove_reservation(id);
            Ok(())
        })
        .await
    }
}
