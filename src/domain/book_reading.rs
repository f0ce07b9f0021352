use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainAction;
use crate::entity::{replace_if_changed, Entity};

use super::error::DomainResult;
use super::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookReadingAction {
    UpdateRating(Option<u8>),
    UpdateComment(Option<String>),
    UpdateStartedAt(NaiveDate),
    UpdateEndedAt(Option<NaiveDate>),
}

impl DomainAction for BookReadingAction {
    fn action_type(&self) -> &'static str {
        match self {
            BookReadingAction::UpdateRating(_) => "UpdateRating",
            BookReadingAction::UpdateComment(_) => "UpdateComment",
            BookReadingAction::UpdateStartedAt(_) => "UpdateStartedAt",
            BookReadingAction::UpdateEndedAt(_) => "UpdateEndedAt",
        }
    }
}

/// One read-through of a user book.
#[derive(Debug, Clone)]
pub struct BookReading {
    pub(crate) entity: Entity<BookReadingAction>,
    pub(crate) user_book_id: Uuid,
    pub(crate) rating: Option<u8>,
    pub(crate) comment: Option<String>,
    pub(crate) started_at: NaiveDate,
    pub(crate) ended_at: Option<NaiveDate>,
}

crate::impl_aggregate!(BookReading, entity, BookReadingAction, "book_reading");

impl BookReading {
    pub fn create(
        user_book_id: Uuid,
        rating: Option<u8>,
        comment: Option<String>,
        started_at: NaiveDate,
        ended_at: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        validation::date_range(started_at, ended_at)?;
        Ok(BookReading {
            entity: Entity::new(),
            user_book_id,
            rating: validation::rating(rating)?,
            comment: validation::optional_text("comment", comment, 1000)?,
            started_at,
            ended_at,
        })
    }

    pub fn user_book_id(&self) -> Uuid {
        self.user_book_id
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn started_at(&self) -> NaiveDate {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<NaiveDate> {
        self.ended_at
    }

    pub fn set_rating(&mut self, rating: Option<u8>) -> DomainResult<()> {
        let rating = validation::rating(rating)?;
        if replace_if_changed(&mut self.rating, rating) {
            self.entity.record(BookReadingAction::UpdateRating(rating));
        }
        Ok(())
    }

    pub fn set_comment(&mut self, comment: Option<String>) -> DomainResult<()> {
        let comment = validation::optional_text("comment", comment, 1000)?;
        if replace_if_changed(&mut self.comment, comment.clone()) {
            self.entity.record(BookReadingAction::UpdateComment(comment));
        }
        Ok(())
    }

    pub fn set_started_at(&mut self, started_at: NaiveDate) -> DomainResult<()> {
        validation::date_range(started_at, self.ended_at)?;
        if replace_if_changed(&mut self.started_at, started_at) {
            self.entity.record(BookReadingAction::UpdateStartedAt(started_at));
        }
        Ok(())
    }

    /// Change both ends at once; only the resulting range has to be valid.
    pub fn set_period(&mut self, started_at: NaiveDate, ended_at: Option<NaiveDate>) -> DomainResult<()> {
        validation::date_range(started_at, ended_at)?;
        if replace_if_changed(&mut self.started_at, started_at) {
            self.entity.record(BookReadingAction::UpdateStartedAt(started_at));
        }
        if replace_if_changed(&mut self.ended_at, ended_at) {
            self.entity.record(BookReadingAction::UpdateEndedAt(ended_at));
        }
        Ok(())
    }

    pub fn set_ended_at(&mut self, ended_at: Option<NaiveDate>) -> DomainResult<()> {
        validation::date_range(self.started_at, ended_at)?;
        if replace_if_changed(&mut self.ended_at, ended_at) {
            self.entity.record(BookReadingAction::UpdateEndedAt(ended_at));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn create_validates_range_and_rating() {
        assert!(BookReading::create(Uuid::new_v4(), Some(11), None, date(1), None).is_err());
        assert!(BookReading::create(Uuid::new_v4(), None, None, date(5), Some(date(4))).is_err());
        let reading =
            BookReading::create(Uuid::new_v4(), Some(8), Some(" great ".into()), date(1), Some(date(9)))
                .unwrap();
        assert_eq!(reading.comment(), Some("great"));
    }

    #[test]
    fn setters_keep_range_valid() {
        let mut reading =
            BookReading::create(Uuid::new_v4(), None, None, date(10), Some(date(20))).unwrap();
        reading.entity.mark_committed();

        assert!(reading.set_started_at(date(21)).is_err());
        assert!(reading.set_ended_at(Some(date(9))).is_err());
        reading.set_ended_at(None).unwrap();
        reading.set_started_at(date(21)).unwrap();

        assert_eq!(
            reading.entity.pending_actions(),
            &[
                BookReadingAction::UpdateEndedAt(None),
                BookReadingAction::UpdateStartedAt(date(21))
            ]
        );
    }

    #[test]
    fn set_period_moves_the_whole_range() {
        let mut reading =
            BookReading::create(Uuid::new_v4(), None, None, date(10), Some(date(12))).unwrap();
        reading.entity.mark_committed();

        reading.set_period(date(20), Some(date(25))).unwrap();
        assert_eq!((reading.started_at(), reading.ended_at()), (date(20), Some(date(25))));
        assert!(reading.set_period(date(26), Some(date(25))).is_err());
        assert_eq!(reading.entity.pending_actions().len(), 2);
    }
}
