//! Sample data for development and demos.
//!
//! Loads a small Hindu festival calendar with its bhajans and Priest Mode
//! rituals, plus an optional demo account with preferences and one
//! contribution.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::model::{
    ContributionStatus, Festival, NewBhajan, NewContribution, NewFestival, NewPreferences,
    NewRitual, NewUser,
};
use crate::storage::Storage;

/// Counts of rows written by [`load_sample_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub festivals: usize,
    pub rituals: usize,
    pub bhajans: usize,
    pub users: usize,
    pub contributions: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        *self == SeedReport::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| Error::InvalidData(format!("invalid seed date {y}-{m}-{d}")))
}

/// Populate `storage` with the sample calendar.
///
/// Does nothing when festivals already exist, so it is safe to call on every
/// start-up. Every sample row is validated before the first insert; a storage
/// failure part way through leaves the rows written so far, and the festival
/// check then skips later runs.
pub fn load_sample_data(storage: &dyn Storage, with_demo_user: bool) -> Result<SeedReport> {
    let mut report = SeedReport::default();
    if !storage.get_all_festivals()?.is_empty() {
        tracing::debug!("festivals present, skipping sample data");
        return Ok(report);
    }

    let (festivals, bhajans, rituals) = sample_rows()?;

    let mut created: Vec<Festival> = Vec::with_capacity(festivals.len());
    for festival in festivals {
        created.push(storage.create_festival(festival)?);
    }
    report.festivals = created.len();
    // Bhajans and rituals hang off Diwali, the first sample festival.
    let diwali = created
        .first()
        .map(|f| f.id)
        .ok_or_else(|| Error::InvalidData("no sample festivals".to_string()))?;

    for mut bhajan in bhajans {
        bhajan.festival_id = Some(diwali);
        storage.create_bhajan(bhajan)?;
        report.bhajans += 1;
    }
    for mut ritual in rituals {
        ritual.festival_id = Some(diwali);
        storage.create_ritual(ritual)?;
        report.rituals += 1;
    }

    if with_demo_user {
        load_demo_user(storage, &mut report)?;
    }

    tracing::info!(
        festivals = report.festivals,
        rituals = report.rituals,
        bhajans = report.bhajans,
        users = report.users,
        "sample data loaded"
    );
    Ok(report)
}

/// Sample festivals, bhajans and rituals, validated as a set. Bhajans and
/// rituals carry no festival id until the festivals are stored.
fn sample_rows() -> Result<(Vec<NewFestival>, Vec<NewBhajan>, Vec<NewRitual>)> {
    // (name, description, date, image, story)
    let festivals = [
        (
            "Diwali",
            "Diwali, the festival of lights, symbolizes the spiritual victory of light over darkness, good over evil, and knowledge over ignorance.",
            date(2026, 11, 8)?,
            "https://images.unsplash.com/photo-1518241353330-0f7941c2d9b5",
            "According to Hindu mythology, Diwali commemorates the return of Lord Rama, his wife Sita, and brother Lakshmana to their kingdom Ayodhya after 14 years of exile and after defeating the demon king Ravana.",
        ),
        (
            "Govardhan Puja",
            "Govardhan Puja is a Hindu festival to worship Govardhan Hill and celebrate the victory of Lord Krishna over Indra.",
            date(2026, 11, 9)?,
            "https://images.unsplash.com/photo-1631265515161-7e561b874ee8",
            "According to Hindu scriptures, Lord Krishna protected the villagers of Vrindavan from a devastating rainstorm sent by the rain god Indra by lifting the Govardhan Hill.",
        ),
        (
            "Bhai Dooj",
            "Bhai Dooj is a festival celebrating the bond between brothers and sisters.",
            date(2026, 11, 11)?,
            "https://images.unsplash.com/photo-1598303127949-c3c51f7b7826",
            "It is believed that Goddess Yamuna welcomed her brother Yama, the God of Death, with a tilak ceremony and by preparing a feast for him.",
        ),
        (
            "Navratri",
            "Nine nights dedicated to the worship of Goddess Durga.",
            date(2026, 10, 11)?,
            "https://example.com/navratri.jpg",
            "Navratri celebrates the victory of Goddess Durga over the demon Mahishasura.",
        ),
        (
            "Holi",
            "Festival of colors celebrating the arrival of spring.",
            date(2027, 3, 22)?,
            "https://example.com/holi.jpg",
            "Holi celebrates the divine love of Radha and Krishna, and the victory of good over evil.",
        ),
    ];

    let festivals: Vec<NewFestival> = festivals
        .into_iter()
        .map(|(name, description, on, image, story)| NewFestival {
            name: name.to_string(),
            description: description.to_string(),
            religion: "Hinduism".to_string(),
            date: on,
            image_url: Some(image.to_string()),
            story: Some(story.to_string()),
        })
        .collect();

    // (title, description, type, url, duration)
    let bhajans = [
        (
            "Lakshmi Aarti",
            "Traditional aarti for Goddess Lakshmi during Diwali celebrations",
            "Traditional",
            "https://www.youtube.com/watch?v=SampleLakshmiAarti",
            "5:28",
        ),
        (
            "Om Jai Jagdish Hare",
            "Classical hymn dedicated to Lord Vishnu",
            "Classical",
            "https://www.youtube.com/watch?v=TXLrJ4zCcbI",
            "7:12",
        ),
        (
            "Jai Lakshmi Mata",
            "Devotional song dedicated to Goddess Lakshmi",
            "Bhajan",
            "https://www.youtube.com/watch?v=OBl4RzX2d9I",
            "4:45",
        ),
    ];
    let bhajans: Vec<NewBhajan> = bhajans
        .into_iter()
        .map(|(title, description, kind, url, duration)| NewBhajan {
            title: title.to_string(),
            description: Some(description.to_string()),
            youtube_url: url.to_string(),
            kind: kind.to_string(),
            religion: "Hinduism".to_string(),
            duration: Some(duration.to_string()),
            festival_id: None,
        })
        .collect();

    // (title, description, content, materials, steps)
    let rituals: [(&str, &str, &str, &[&str], &[&str]); 3] = [
        (
            "Diwali Puja Vidhi",
            "Complete ritual procedure for Diwali Puja",
            "Detailed instructions for performing Diwali Puja at home",
            &[
                "A small statue or picture of Goddess Lakshmi and Lord Ganesha",
                "A red cloth to place the deities",
                "Incense sticks (agarbatti) and holder",
                "Camphor (kapur) and holder",
                "Ghee lamp or oil lamp with cotton wicks",
                "Gangajal (holy water) or clean water",
                "Roli (kumkum), haldi (turmeric), chandan (sandalwood paste)",
                "Akshat (rice grains mixed with turmeric)",
                "Flowers and garlands",
                "Sweets and fruits for offering (prasad)",
                "Bell (ghanti)",
                "Conch shell (shankh)",
            ],
            &[
                "Begin by cleaning the puja area and taking a bath. Place a red cloth on a raised platform and arrange the idols.",
                "Light the incense sticks and the lamp. Invoke Lord Ganesha first to remove all obstacles.",
                "Offer water, akshata, flowers, and garlands to the deities while chanting their names.",
                "Light the lamp with ghee or oil and offer it to the deities.",
                "Recite the mantras and prayers for Goddess Lakshmi and Lord Ganesha.",
                "Offer sweets and fruits as prasad.",
                "Perform aarti with the lamp.",
            ],
        ),
        (
            "Lakshmi Puja",
            "Prayer to Goddess Lakshmi for prosperity and wealth",
            "Detailed steps for performing Lakshmi Puja on Diwali",
            &["Flowers", "Incense", "Ghee lamp", "Sweets", "Coins"],
            &[
                "Clean and decorate your home",
                "Set up the puja thali",
                "Light the lamp and incense",
                "Offer flowers and sweets",
                "Recite Lakshmi mantras",
                "Perform aarti",
            ],
        ),
        (
            "Diwali Home Decoration",
            "Traditional ways to decorate home for Diwali",
            "Guide for decorating your home for Diwali celebrations",
            &["Rangoli colors", "Diyas", "Candles", "Flowers", "Fairy lights"],
            &[
                "Clean the entire house thoroughly",
                "Create rangoli designs at the entrance",
                "Place diyas around the house",
                "Hang lights and lanterns",
                "Decorate with flowers and torans",
            ],
        ),
    ];
    let rituals: Vec<NewRitual> = rituals
        .into_iter()
        .map(|(title, description, content, materials, steps)| NewRitual {
            festival_id: None,
            title: title.to_string(),
            description: description.to_string(),
            content: content.to_string(),
            materials: materials.iter().map(|m| m.to_string()).collect(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
            religion: "Hinduism".to_string(),
            verified: true,
            contributor_id: None,
        })
        .collect();

    festivals.iter().try_for_each(NewFestival::validate)?;
    bhajans.iter().try_for_each(NewBhajan::validate)?;
    rituals.iter().try_for_each(NewRitual::validate)?;
    Ok((festivals, bhajans, rituals))
}

fn load_demo_user(storage: &dyn Storage, report: &mut SeedReport) -> Result<()> {
    if storage.get_user_by_google_id("123456789")?.is_some() {
        return Ok(());
    }

    let user = storage.create_user(NewUser {
        username: "testuser".to_string(),
        email: "test@example.com".to_string(),
        google_id: "123456789".to_string(),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        profile_picture: None,
    })?;
    report.users += 1;

    let mut preferences = NewPreferences::defaults_for(user.id);
    preferences.secondary_interests = vec!["Buddhism".to_string(), "Jainism".to_string()];
    preferences.languages = vec!["English".to_string(), "Hindi".to_string()];
    storage.create_user_preferences(preferences)?;

    storage.create_contribution(NewContribution {
        user_id: user.id,
        title: "Navratri Garba Dance Steps".to_string(),
        description: Some("Traditional Garba dance steps for Navratri celebrations".to_string()),
        file_url: Some("https://example.com/garba-guide.pdf".to_string()),
        content: Some(
            "A detailed guide on performing Garba dance during Navratri festival".to_string(),
        ),
        religion: "Hinduism".to_string(),
        festival: Some("Navratri".to_string()),
        status: ContributionStatus::Verified,
    })?;
    report.contributions += 1;
    Ok(())
}
