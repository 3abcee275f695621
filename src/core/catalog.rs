use crate::core::pricing::PricingCalculator;
use crate::domain::model::{ParticipantCount, PriceSummary, SeminarOffering, MAX_PARTICIPANTS};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{BookingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingFilter {
    #[default]
    All,
    Popular,
    Featured,
}

impl std::str::FromStr for ListingFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ListingFilter::All),
            "popular" => Ok(ListingFilter::Popular),
            "featured" => Ok(ListingFilter::Featured),
            other => Err(format!("unknown listing filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Matched case-insensitively against the destination.
    pub search: String,
    pub filter: ListingFilter,
}

impl ListingQuery {
    pub fn matches(&self, offering: &SeminarOffering) -> bool {
        let matches_search = offering
            .destination
            .to_lowercase()
            .contains(&self.search.to_lowercase());

        let matches_filter = match self.filter {
            ListingFilter::All => true,
            ListingFilter::Popular => offering.popular,
            ListingFilter::Featured => offering.featured,
        };

        matches_search && matches_filter
    }
}

#[derive(Debug, Serialize)]
struct ListingRow<'a> {
    id: u32,
    title: &'a str,
    destination: &'a str,
    unit_price: u64,
    date_range: &'a str,
    duration_label: &'a str,
    category: &'a str,
}

#[derive(Serialize)]
struct QuoteRow<'a> {
    offering_id: u32,
    title: &'a str,
    unit_price: u64,
    participants: u32,
    subtotal: u64,
    tax: String,
    total: String,
}

/// Static seminar catalog keyed by offering id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    offerings: BTreeMap<u32, SeminarOffering>,
}

impl Catalog {
    pub fn from_offerings(offerings: Vec<SeminarOffering>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for offering in offerings {
            let id = offering.id;
            if offering
                .unit_price
                .checked_mul(u64::from(MAX_PARTICIPANTS))
                .is_none()
            {
                return Err(BookingError::InvalidConfigValueError {
                    field: format!("offerings[id={}].unit_price", id),
                    value: offering.unit_price.to_string(),
                    reason: format!("price for {} participants overflows", MAX_PARTICIPANTS),
                });
            }
            if map.insert(id, offering).is_some() {
                return Err(BookingError::ConfigError {
                    message: format!("duplicate seminar id {} in catalog", id),
                });
            }
        }
        tracing::debug!("Catalog loaded with {} offerings", map.len());
        Ok(Self { offerings: map })
    }

    pub fn load<S: CatalogSource + ?Sized>(source: &S) -> Result<Self> {
        Self::from_offerings(source.offerings()?)
    }

    pub fn builtin() -> Self {
        Self {
            offerings: builtin_offerings().into_iter().map(|o| (o.id, o)).collect(),
        }
    }

    pub fn get(&self, id: u32) -> Result<&SeminarOffering> {
        self.offerings.get(&id).ok_or(BookingError::NotFound { id })
    }

    /// Prices a booking; an unknown id yields `NotFound` before any arithmetic.
    pub fn quote(&self, id: u32, participants: ParticipantCount) -> Result<PriceSummary> {
        let offering = self.get(id)?;
        Ok(PricingCalculator::for_offering(offering, participants))
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeminarOffering> {
        self.offerings.values()
    }

    pub fn search(&self, query: &ListingQuery) -> Vec<&SeminarOffering> {
        self.iter().filter(|o| query.matches(o)).collect()
    }
}

pub fn write_listing_csv<W: Write>(offerings: &[&SeminarOffering], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for offering in offerings {
        csv_writer.serialize(ListingRow {
            id: offering.id,
            title: &offering.title,
            destination: &offering.destination,
            unit_price: offering.unit_price,
            date_range: &offering.date_range,
            duration_label: &offering.duration_label,
            category: &offering.category,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Single-row CSV for a priced booking; tax and total use the display rounding.
pub fn write_quote_csv<W: Write>(
    offering: &SeminarOffering,
    summary: &PriceSummary,
    writer: W,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.serialize(QuoteRow {
        offering_id: offering.id,
        title: &offering.title,
        unit_price: summary.unit_price,
        participants: summary.participants.get(),
        subtotal: summary.subtotal,
        tax: summary.tax_display(),
        total: summary.total_display(),
    })?;
    csv_writer.flush()?;
    Ok(())
}

pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn offerings(&self) -> Result<Vec<SeminarOffering>> {
        Ok(builtin_offerings())
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_offerings() -> Vec<SeminarOffering> {
    vec![
        SeminarOffering {
            id: 1,
            title: "Implantologie Avancée".to_string(),
            destination: "Tbilisi, Géorgie".to_string(),
            unit_price: 2499,
            date_range: "15-20 Mars 2025".to_string(),
            duration_label: "6 jours".to_string(),
            category: "Dentisterie".to_string(),
            featured: true,
            popular: true,
            description: "Perfectionnez vos compétences en implantologie avec ce séminaire intensif dirigé par des experts reconnus internationalement.".to_string(),
            program: lines(&[
                "Jour 1-2: Fondamentaux de l'implantologie moderne",
                "Jour 3-4: Techniques chirurgicales avancées",
                "Jour 5: Gestion des cas complexes",
                "Jour 6: Pratique clinique et certification",
            ]),
            included: lines(&[
                "Formation théorique et pratique",
                "Matériel pédagogique complet",
                "Certificat de participation",
                "Hébergement 5 étoiles",
                "Repas et pauses café",
                "Excursions culturelles",
            ]),
        },
        SeminarOffering {
            id: 2,
            title: "Orthodontie Moderne".to_string(),
            destination: "Paris, France".to_string(),
            unit_price: 1899,
            date_range: "10-14 Avril 2025".to_string(),
            duration_label: "5 jours".to_string(),
            category: "Dentisterie".to_string(),
            featured: false,
            popular: true,
            description: "Découvrez les dernières avancées en orthodontie moderne et les techniques invisibles.".to_string(),
            program: lines(&[
                "Jour 1: Introduction aux aligneurs invisibles",
                "Jour 2-3: Planification numérique et cas cliniques",
                "Jour 4: Techniques avancées",
                "Jour 5: Pratique et évaluation",
            ]),
            included: lines(&[
                "Formation complète",
                "Documentation technique",
                "Certificat professionnel",
                "Hébergement centre Paris",
                "Petit-déjeuner inclus",
                "Visite guidée de Paris",
            ]),
        },
        SeminarOffering {
            id: 3,
            title: "Chirurgie Esthétique".to_string(),
            destination: "Singapour".to_string(),
            unit_price: 3299,
            date_range: "5-12 Mai 2025".to_string(),
            duration_label: "8 jours".to_string(),
            category: "Chirurgie".to_string(),
            featured: true,
            popular: false,
            description: "Séminaire exclusif de chirurgie esthétique avec des chirurgiens renommés.".to_string(),
            program: lines(&[
                "Jour 1-2: Fondamentaux de la chirurgie esthétique",
                "Jour 3-4: Techniques faciales avancées",
                "Jour 5-6: Procédures corporelles",
                "Jour 7: Gestion post-opératoire",
                "Jour 8: Examen et certification",
            ]),
            included: lines(&[
                "Formation intensive",
                "Accès à la clinique privée",
                "Certificat international",
                "Hôtel de luxe Marina Bay",
                "Tous les repas inclus",
                "Excursions et activités",
            ]),
        },
        SeminarOffering {
            id: 4,
            title: "Parodontologie Clinique".to_string(),
            destination: "Barcelone, Espagne".to_string(),
            unit_price: 1699,
            date_range: "22-26 Juin 2025".to_string(),
            duration_label: "5 jours".to_string(),
            category: "Dentisterie".to_string(),
            featured: false,
            popular: true,
            description: "Maîtrisez les techniques modernes de parodontologie.".to_string(),
            program: lines(&[
                "Jour 1: Diagnostic parodontal",
                "Jour 2-3: Techniques chirurgicales",
                "Jour 4: Maintenance et prévention",
                "Jour 5: Cas pratiques",
            ]),
            included: lines(&[
                "Formation complète",
                "Kit parodontal",
                "Certificat",
                "Hébergement boutique",
                "Repas inclus",
                "Visite de Barcelone",
            ]),
        },
        SeminarOffering {
            id: 5,
            title: "Dermatologie Esthétique".to_string(),
            destination: "Dubai, EAU".to_string(),
            unit_price: 2899,
            date_range: "8-14 Juillet 2025".to_string(),
            duration_label: "7 jours".to_string(),
            category: "Dermatologie".to_string(),
            featured: true,
            popular: false,
            description: "Formation avancée en dermatologie esthétique avec accès aux dernières technologies.".to_string(),
            program: lines(&[
                "Jour 1-2: Injectables et fillers",
                "Jour 3-4: Lasers et technologies",
                "Jour 5-6: Traitements combinés",
                "Jour 7: Certification",
            ]),
            included: lines(&[
                "Formation premium",
                "Accès équipements de pointe",
                "Certificat international",
                "Hôtel 5 étoiles",
                "Tous les repas",
                "Safari dans le désert",
            ]),
        },
        SeminarOffering {
            id: 6,
            title: "Endodontie Avancée".to_string(),
            destination: "Lisbonne, Portugal".to_string(),
            unit_price: 1599,
            date_range: "15-19 Août 2025".to_string(),
            duration_label: "5 jours".to_string(),
            category: "Dentisterie".to_string(),
            featured: false,
            popular: false,
            description: "Perfectionnez vos techniques endodontiques avec les meilleurs spécialistes européens.".to_string(),
            program: lines(&[
                "Jour 1: Anatomie canalaire moderne",
                "Jour 2-3: Techniques de traitement",
                "Jour 4: Cas complexes",
                "Jour 5: Pratique et évaluation",
            ]),
            included: lines(&[
                "Formation technique",
                "Équipement professionnel",
                "Certificat",
                "Hébergement centre-ville",
                "Petits-déjeuners",
                "Découverte de Lisbonne",
            ]),
        },
    ]
}
