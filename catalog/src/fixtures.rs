//! Built-in demo listings, standing in for the portal's mock seed data.

use jobdesk_interest::types::ListingKind;

use crate::types::Listing;

/// Demo listings for one kind. Ids are stable across runs so saved and
/// applied records keep pointing at the same entries.
pub fn demo_listings(kind: ListingKind) -> Vec<Listing> {
    match kind {
        ListingKind::Job => jobs(),
        ListingKind::Training => trainings(),
        ListingKind::Scholarship => scholarships(),
    }
}

fn listing(
    id: u64,
    title: &str,
    provider: &str,
    description: &str,
    location: &str,
    posted_at: &str,
) -> Listing {
    Listing {
        id,
        title: title.to_string(),
        provider: provider.to_string(),
        description: description.to_string(),
        location: Some(location.to_string()),
        salary: None,
        employment_type: None,
        requirements: None,
        posted_at: Some(posted_at.to_string()),
    }
}

fn jobs() -> Vec<Listing> {
    let mut out = vec![
        listing(
            41,
            "Junior Software Developer",
            "TechServe Solutions",
            "Build and maintain internal web applications alongside the platform team.",
            "Quezon City",
            "2025-06-02T08:00:00Z",
        ),
        listing(
            42,
            "Software Developer",
            "TechServe Solutions",
            "Design REST services and ship features end to end with a small product squad.",
            "Makati",
            "2025-06-20T08:00:00Z",
        ),
        listing(
            43,
            "Accounting Staff",
            "Crestline Logistics",
            "Handle accounts payable, billing reconciliation and month-end closing.",
            "Pasig",
            "2025-05-28T08:00:00Z",
        ),
        listing(
            44,
            "Customer Support Representative",
            "Northbridge BPO",
            "Front-line email and chat support for a retail account, night shift.",
            "Taguig",
            "2025-07-01T08:00:00Z",
        ),
    ];
    out[0].employment_type = Some("Full-time".to_string());
    out[0].salary = Some("PHP 25,000 - 32,000".to_string());
    out[1].employment_type = Some("Full-time".to_string());
    out[1].salary = Some("PHP 40,000 - 55,000".to_string());
    out[1].requirements = Some("2+ years building REST APIs; SQL fluency.".to_string());
    out[3].employment_type = Some("Shift-based".to_string());
    out
}

fn trainings() -> Vec<Listing> {
    vec![
        listing(
            3,
            "Web Development Bootcamp",
            "Skills Forward Institute",
            "Twelve-week hands-on program covering HTML, CSS, JavaScript and deployment.",
            "Manila",
            "2025-06-10T08:00:00Z",
        ),
        listing(
            4,
            "Basic Welding NC II",
            "Eastfield Technical College",
            "Assessment-ready welding course with shop practice and safety certification.",
            "Caloocan",
            "2025-05-15T08:00:00Z",
        ),
        listing(
            5,
            "Customer Service Excellence",
            "Northbridge BPO",
            "Two-day workshop on handling escalations and service recovery.",
            "Taguig",
            "2025-07-05T08:00:00Z",
        ),
    ]
}

fn scholarships() -> Vec<Listing> {
    vec![
        listing(
            7,
            "Academic Excellence Scholarship",
            "Lakeside Foundation",
            "Full tuition for incoming students with a general average of 93 or higher.",
            "Nationwide",
            "2025-04-30T08:00:00Z",
        ),
        listing(
            8,
            "STEM Undergraduate Grant",
            "Meridian Trust",
            "Partial tuition and book allowance for engineering and science majors.",
            "Nationwide",
            "2025-05-18T08:00:00Z",
        ),
        listing(
            9,
            "Working Student Assistance Program",
            "City Education Office",
            "Stipend support for students employed at least twenty hours a week.",
            "Quezon City",
            "2025-06-25T08:00:00Z",
        ),
    ]
}
