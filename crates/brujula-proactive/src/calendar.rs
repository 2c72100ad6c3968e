//! Colombian retail calendar.
//!
//! Event dates are rules rather than absolute dates so the calendar never
//! runs dry: each rule is resolved to its next occurrence in Colombia local
//! time (UTC-05:00, no daylight saving).

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc, Weekday};
use serde::Serialize;

const COLOMBIA_UTC_OFFSET_SECS: i32 = 5 * 3600;

pub fn colombia_offset() -> FixedOffset {
    FixedOffset::west_opt(COLOMBIA_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// How an event's date is computed for a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDate {
    /// Same month and day every year
    Fixed { month: u32, day: u32 },
    /// `nth` `weekday` of `month`, shifted by `offset_days`
    NthWeekday {
        month: u32,
        weekday: Weekday,
        nth: u8,
        offset_days: i64,
    },
    /// One-off date; has no occurrence after it passes
    Once(NaiveDate),
}

impl EventDate {
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            EventDate::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            EventDate::NthWeekday {
                month,
                weekday,
                nth,
                offset_days,
            } => NaiveDate::from_weekday_of_month_opt(year, month, weekday, nth)
                .map(|d| d + Duration::days(offset_days)),
            EventDate::Once(date) => (date.year() == year).then_some(date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetailEvent {
    /// Canonical name, also used as the topic keyword
    pub name: &'static str,
    pub description: &'static str,
    pub date: EventDate,
}

/// A resolved occurrence of a [`RetailEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub name: &'static str,
    pub description: &'static str,
    pub date: NaiveDate,
    pub starts_at: DateTime<Utc>,
    pub days_until: i64,
}

pub const COLOMBIAN_RETAIL_EVENTS: &[RetailEvent] = &[
    RetailEvent {
        name: "Temporada escolar",
        description: "Regreso a clases: útiles, uniformes y tecnología para estudiantes.",
        date: EventDate::Fixed { month: 1, day: 20 },
    },
    RetailEvent {
        name: "Día de la Mujer",
        description: "Campañas de reconocimiento y regalos; evita los clichés.",
        date: EventDate::Fixed { month: 3, day: 8 },
    },
    RetailEvent {
        name: "Día de la Madre",
        description: "Una de las fechas de mayor venta del año en Colombia.",
        date: EventDate::NthWeekday {
            month: 5,
            weekday: Weekday::Sun,
            nth: 2,
            offset_days: 0,
        },
    },
    RetailEvent {
        name: "Día del Padre",
        description: "Regalos, experiencias y promociones en tecnología y moda masculina.",
        date: EventDate::NthWeekday {
            month: 6,
            weekday: Weekday::Sun,
            nth: 3,
            offset_days: 0,
        },
    },
    RetailEvent {
        name: "Prima de junio",
        description: "Pago de prima de mitad de año: el consumo de los hogares sube.",
        date: EventDate::Fixed { month: 6, day: 30 },
    },
    RetailEvent {
        name: "Amor y Amistad",
        description: "El San Valentín colombiano: detalles, restaurantes y planes en pareja o con amigos.",
        date: EventDate::NthWeekday {
            month: 9,
            weekday: Weekday::Sat,
            nth: 3,
            offset_days: 0,
        },
    },
    RetailEvent {
        name: "Halloween",
        description: "Disfraces, dulces y contenidos temáticos para familias.",
        date: EventDate::Fixed { month: 10, day: 31 },
    },
    RetailEvent {
        name: "Black Friday",
        description: "Descuentos agresivos; prepara inventario y campañas con anticipación.",
        date: EventDate::NthWeekday {
            month: 11,
            weekday: Weekday::Thu,
            nth: 4,
            offset_days: 1,
        },
    },
    RetailEvent {
        name: "Cyber Monday",
        description: "Cierre de la temporada de descuentos con foco en e-commerce.",
        date: EventDate::NthWeekday {
            month: 11,
            weekday: Weekday::Thu,
            nth: 4,
            offset_days: 4,
        },
    },
    RetailEvent {
        name: "Día de las Velitas",
        description: "Inicio oficial de la temporada navideña en Colombia.",
        date: EventDate::Fixed { month: 12, day: 7 },
    },
    RetailEvent {
        name: "Navidad",
        description: "Temporada de regalos y prima de diciembre.",
        date: EventDate::Fixed { month: 12, day: 25 },
    },
];

#[derive(Debug, Clone)]
pub struct EventCalendar {
    events: Vec<RetailEvent>,
}

impl Default for EventCalendar {
    fn default() -> Self {
        Self::new(COLOMBIAN_RETAIL_EVENTS.to_vec())
    }
}

impl EventCalendar {
    pub fn new(events: Vec<RetailEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[RetailEvent] {
        &self.events
    }

    /// Next occurrence of `event` whose local start is strictly after `now`
    pub fn next_occurrence(event: &RetailEvent, now: DateTime<Utc>) -> Option<UpcomingEvent> {
        let offset = colombia_offset();
        let today = now.with_timezone(&offset).date_naive();

        [today.year(), today.year() + 1]
            .into_iter()
            .filter_map(|year| event.date.in_year(year))
            .filter_map(|date| {
                let starts_at = offset
                    .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
                    .single()?
                    .with_timezone(&Utc);
                (starts_at > now).then(|| UpcomingEvent {
                    name: event.name,
                    description: event.description,
                    date,
                    starts_at,
                    days_until: (date - today).num_days(),
                })
            })
            .next()
    }

    /// Events that start after `now`, nearest first
    pub fn upcoming(&self, now: DateTime<Utc>, limit: usize) -> Vec<UpcomingEvent> {
        let mut upcoming: Vec<UpcomingEvent> = self
            .events
            .iter()
            .filter_map(|event| Self::next_occurrence(event, now))
            .collect();
        upcoming.sort_by_key(|e| e.starts_at);
        upcoming.truncate(limit);
        upcoming
    }

    pub fn next_event(&self, now: DateTime<Utc>) -> Option<UpcomingEvent> {
        self.upcoming(now, 1).into_iter().next()
    }
}
