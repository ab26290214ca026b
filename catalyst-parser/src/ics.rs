use ics::{
    parameters::Value,
    properties::{Description, DtEnd, DtStart, Summary},
    ICalendar,
};

use crate::Event;

impl Event {
    #[must_use]
    pub fn to_ics(&self) -> ics::Event<'_> {
        let start = self.date.format("%Y%m%d").to_string();
        let end = self
            .date
            .succ_opt()
            .unwrap_or(self.date)
            .format("%Y%m%d")
            .to_string();

        let id = format!("{}_{}", start, self.summary().replace(' ', "-"));

        let mut ics_event = ics::Event::new(id, format!("{start}T000000Z"));

        let mut dtstart = DtStart::new(start);
        dtstart.add(Value::DATE);
        ics_event.push(dtstart);

        let mut dtend = DtEnd::new(end);
        dtend.add(Value::DATE);
        ics_event.push(dtend);

        ics_event.push(Summary::new(ics::escape_text(self.summary())));
        ics_event.push(Description::new(ics::escape_text(self.label.as_str())));

        ics_event
    }
}

/// All-day iCalendar entries for every event.
#[must_use]
pub fn to_ics<'a>(name: &'a str, events: &'a [Event]) -> ICalendar<'a> {
    let mut icalendar = ICalendar::new("2.0", name);

    for event in events {
        icalendar.add_event(event.to_ics());
    }

    icalendar
}
