//! Demo tickets installed into an empty store.

use chrono::{DateTime, Duration, Utc};

use crate::model::{Priority, Status, Ticket};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| (*t).to_string()).collect()
}

/// The four demo tickets, timestamped relative to `now`.
#[must_use]
pub fn demo_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    let days = Duration::days;
    vec![
        Ticket {
            id: 1,
            title: "System Performance Optimization".to_string(),
            description: "Investigate and resolve slow database queries affecting user \
                          experience across multiple modules"
                .to_string(),
            status: Status::Open,
            priority: Priority::High,
            assignee: Some("Sarah Johnson".to_string()),
            customer_name: Some("Tech Corp Ltd".to_string()),
            created_at: now,
            updated_at: now,
            due_date: Some(now + days(7)),
            estimated_hours: Some(8),
            tags: tags(&["performance", "database"]),
        },
        Ticket {
            id: 2,
            title: "Mobile App Authentication Bug".to_string(),
            description: "Users unable to login on iOS devices running version 16.x and above"
                .to_string(),
            status: Status::InProgress,
            priority: Priority::Critical,
            assignee: Some("Mike Chen".to_string()),
            customer_name: Some("Mobile Solutions Inc".to_string()),
            created_at: now - days(2),
            updated_at: now - days(1),
            due_date: Some(now + days(3)),
            estimated_hours: Some(12),
            tags: tags(&["mobile", "authentication", "iOS"]),
        },
        Ticket {
            id: 3,
            title: "Feature Request: Dark Mode".to_string(),
            description: "Implement dark mode theme across the entire application with user \
                          preference storage"
                .to_string(),
            status: Status::Resolved,
            priority: Priority::Medium,
            assignee: Some("Alex Rodriguez".to_string()),
            customer_name: Some("Design Systems Team".to_string()),
            created_at: now - days(5),
            updated_at: now - days(1),
            due_date: Some(now - days(1)),
            estimated_hours: Some(16),
            tags: tags(&["feature", "UI/UX"]),
        },
        Ticket {
            id: 4,
            title: "Email Notification System".to_string(),
            description: "Set up automated email notifications for ticket status changes and \
                          assignments"
                .to_string(),
            status: Status::Open,
            priority: Priority::Medium,
            assignee: Some("Lisa Wang".to_string()),
            customer_name: Some("Internal Operations".to_string()),
            created_at: now - days(3),
            updated_at: now - days(3),
            due_date: Some(now + days(10)),
            estimated_hours: Some(6),
            tags: tags(&["notifications", "email"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn demo_set_is_well_formed() {
        let now = Utc::now();
        let tickets = demo_tickets(now);
        assert_eq!(tickets.len(), 4);

        let ids: HashSet<_> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(tickets.iter().all(|t| t.updated_at >= t.created_at));
        assert!(tickets.iter().all(|t| t.created_at <= now));
    }

    #[test]
    fn only_the_resolved_ticket_is_past_due() {
        let now = Utc::now();
        let past_due: Vec<_> = demo_tickets(now)
            .into_iter()
            .filter(|t| t.due_date.is_some_and(|d| d < now))
            .collect();
        assert_eq!(past_due.len(), 1);
        assert_eq!(past_due[0].status, Status::Resolved);
    }
}
