//! Gender and climate indicator banks.
//!
//! Six banks are generated per country from a single seeded RNG. Values are
//! biased by income level so cross-bank comparisons have some structure.

use crate::countries::{COUNTRIES, Country, DIMENSIONS, IncomeLevel};
use crate::round_to;
use chrono::NaiveDate;
use insight_rs_protocol::DataSource;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

/// Identifier of a data bank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BankId {
    #[serde(rename = "unwomen")]
    UnWomen,
    #[serde(rename = "worldbank")]
    WorldBank,
    Undp,
    Climate,
    Who,
    Ilo,
}

impl BankId {
    /// All banks in presentation order.
    pub const ALL: [BankId; 6] = [
        BankId::UnWomen,
        BankId::WorldBank,
        BankId::Undp,
        BankId::Climate,
        BankId::Who,
        BankId::Ilo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BankId::UnWomen => "unwomen",
            BankId::WorldBank => "worldbank",
            BankId::Undp => "undp",
            BankId::Climate => "climate",
            BankId::Who => "who",
            BankId::Ilo => "ilo",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BankId::UnWomen => "UN Women Climate Scorecard",
            BankId::WorldBank => "World Bank Gender Data",
            BankId::Undp => "UNDP Human Development",
            BankId::Climate => "Climate Watch",
            BankId::Who => "WHO Health Data",
            BankId::Ilo => "ILO Labour Statistics",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            BankId::UnWomen => "🏛️",
            BankId::WorldBank => "📊",
            BankId::Undp => "🎯",
            BankId::Climate => "🌡️",
            BankId::Who => "🏥",
            BankId::Ilo => "👷",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            BankId::UnWomen => "#E91E63",
            BankId::WorldBank => "#2196F3",
            BankId::Undp => "#00BCD4",
            BankId::Climate => "#4CAF50",
            BankId::Who => "#03A9F4",
            BankId::Ilo => "#FF9800",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            BankId::UnWomen => "Gender dimensions of climate policy across six scored dimensions",
            BankId::WorldBank => "Economic gender indicators: employment, education, access to finance",
            BankId::Undp => "Human Development Index, Gender Inequality Index, multidimensional poverty",
            BankId::Climate => "NDC commitments, emissions, climate targets, adaptation plans",
            BankId::Who => "Women's health indicators: maternal mortality, reproductive health",
            BankId::Ilo => "Labour market, unpaid care work, green jobs, working conditions",
        }
    }

    /// Metadata record advertised to clients.
    pub fn source(&self) -> DataSource {
        DataSource {
            id: self.as_str().to_string(),
            name: self.display_name().to_string(),
            icon: self.icon().to_string(),
            color: self.color().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BankId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BankId::ALL
            .into_iter()
            .find(|bank| bank.as_str() == value.trim().to_lowercase())
            .ok_or_else(|| format!("unknown bank: {value}"))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UnWomenRecord {
    pub overall_score: f64,
    /// Scores indexed like [`DIMENSIONS`].
    pub dimensions: [f64; 6],
    pub women_in_delegation: f64,
    pub has_gender_focal_point: bool,
    pub ndc_gender_references: u32,
}

impl UnWomenRecord {
    /// Dimensions sorted from weakest to strongest.
    pub fn weakest_dimensions(&self) -> Vec<(&'static str, f64)> {
        let mut scored: Vec<_> = DIMENSIONS
            .iter()
            .zip(self.dimensions)
            .map(|(dimension, score)| (dimension.label, score))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorldBankRecord {
    pub female_labor_force_participation: f64,
    pub gender_wage_gap: f64,
    pub female_account_ownership: f64,
    pub female_secondary_education: f64,
    pub female_tertiary_education: f64,
    pub women_in_parliament: f64,
    pub female_land_ownership: f64,
    pub female_entrepreneurship: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UndpRecord {
    pub hdi: f64,
    /// 1-based rank by HDI across all covered countries.
    pub hdi_rank: usize,
    pub gender_inequality_index: f64,
    pub gender_development_index: f64,
    pub mpi_headcount: f64,
    pub life_expectancy_female: f64,
    pub expected_schooling_female: f64,
    pub gni_per_capita_female: f64,
}

impl UndpRecord {
    pub fn category(&self) -> &'static str {
        if self.hdi >= 0.8 {
            "Very High"
        } else if self.hdi >= 0.7 {
            "High"
        } else if self.hdi >= 0.55 {
            "Medium"
        } else {
            "Low"
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClimateRecord {
    pub total_emissions_mtco2: f64,
    pub emissions_per_capita: f64,
    /// Committed 2030 reduction, in percent.
    pub ndc_target_2030_pct: u32,
    pub ndc_year: u32,
    pub net_zero_year: Option<u32>,
    pub adaptation_plan: bool,
    pub climate_vulnerability_index: f64,
    pub renewable_energy_share: f64,
    /// Zero for high-income donor countries.
    pub climate_finance_received_musd: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WhoRecord {
    pub maternal_mortality_ratio: u32,
    pub skilled_birth_attendance: f64,
    pub contraceptive_prevalence: f64,
    pub antenatal_care_coverage: f64,
    pub adolescent_birth_rate: f64,
    pub female_hiv_prevalence: f64,
    pub uhc_service_coverage_index: f64,
    pub heat_wave_mortality_female: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IloRecord {
    pub female_unemployment: f64,
    pub youth_female_neet: f64,
    pub unpaid_care_hours_female: f64,
    pub unpaid_care_hours_male: f64,
    pub informal_employment_female: f64,
    pub green_jobs_female_share: f64,
    pub female_managers_share: f64,
    pub maternity_leave_weeks: u32,
    pub childcare_enrollment_0_3: f64,
}

impl IloRecord {
    /// Weekly unpaid care hours women carry beyond men.
    pub fn care_gap(&self) -> f64 {
        round_to(self.unpaid_care_hours_female - self.unpaid_care_hours_male, 1)
    }
}

/// All bank records for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecords {
    pub country: &'static Country,
    pub unwomen: UnWomenRecord,
    pub worldbank: WorldBankRecord,
    pub undp: UndpRecord,
    pub climate: ClimateRecord,
    pub who: WhoRecord,
    pub ilo: IloRecord,
}

/// Seeded multi-bank indicator store.
#[derive(Debug, Clone)]
pub struct ClimateHub {
    as_of: NaiveDate,
    records: Vec<CountryRecords>,
}

impl ClimateHub {
    /// Generate every bank for every covered country.
    pub fn generate(seed: u64, as_of: NaiveDate) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let unwomen: Vec<_> = COUNTRIES.iter().map(|c| gen_unwomen(&mut rng, c)).collect();
        let worldbank: Vec<_> = COUNTRIES.iter().map(|c| gen_worldbank(&mut rng, c)).collect();
        let mut undp: Vec<_> = COUNTRIES.iter().map(|c| gen_undp(&mut rng, c)).collect();
        let climate: Vec<_> = COUNTRIES.iter().map(|c| gen_climate(&mut rng, c)).collect();
        let who: Vec<_> = COUNTRIES.iter().map(|c| gen_who(&mut rng, c)).collect();
        let ilo: Vec<_> = COUNTRIES.iter().map(|_| gen_ilo(&mut rng)).collect();

        let mut by_hdi: Vec<usize> = (0..undp.len()).collect();
        by_hdi.sort_by(|a, b| undp[*b].hdi.total_cmp(&undp[*a].hdi));
        for (rank, idx) in by_hdi.into_iter().enumerate() {
            undp[idx].hdi_rank = rank + 1;
        }

        let records = COUNTRIES
            .iter()
            .zip(unwomen)
            .zip(worldbank)
            .zip(undp)
            .zip(climate)
            .zip(who)
            .zip(ilo)
            .map(
                |((((((country, unwomen), worldbank), undp), climate), who), ilo)| CountryRecords {
                    country,
                    unwomen,
                    worldbank,
                    undp,
                    climate,
                    who,
                    ilo,
                },
            )
            .collect::<Vec<_>>();
        info!(
            "generated climate hub (seed={}, countries={}, banks={})",
            seed,
            records.len(),
            BankId::ALL.len()
        );
        Self { as_of, records }
    }

    /// Reference date used for dated outputs such as policy briefs.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Records for every country, in table order.
    pub fn all(&self) -> &[CountryRecords] {
        &self.records
    }

    /// Records for a country code.
    pub fn records(&self, code: &str) -> Option<&CountryRecords> {
        self.records
            .iter()
            .find(|record| record.country.code.eq_ignore_ascii_case(code))
    }

    /// Metadata for all banks.
    pub fn sources(&self) -> Vec<DataSource> {
        BankId::ALL.iter().map(BankId::source).collect()
    }

    /// Presentation view of one bank's data for a country.
    pub fn country_data(&self, bank: BankId, code: &str) -> Option<Value> {
        let records = self.records(code)?;
        let country = records.country.name;
        let source = bank.display_name();
        let value = match bank {
            BankId::UnWomen => {
                let d = &records.unwomen;
                let dimensions: serde_json::Map<String, Value> = DIMENSIONS
                    .iter()
                    .zip(d.dimensions)
                    .map(|(dimension, score)| (dimension.label.to_string(), json!(score)))
                    .collect();
                json!({
                    "source": source,
                    "country": country,
                    "overall_score": d.overall_score,
                    "dimensions": dimensions,
                    "women_in_climate_delegation": d.women_in_delegation,
                    "gender_focal_point": d.has_gender_focal_point,
                    "ndc_gender_references": d.ndc_gender_references,
                })
            }
            BankId::WorldBank => {
                let d = &records.worldbank;
                json!({
                    "source": source,
                    "country": country,
                    "labor_force": {
                        "female_participation": d.female_labor_force_participation,
                        "gender_wage_gap": d.gender_wage_gap,
                    },
                    "education": {
                        "female_secondary": d.female_secondary_education,
                        "female_tertiary": d.female_tertiary_education,
                    },
                    "economic_empowerment": {
                        "account_ownership": d.female_account_ownership,
                        "land_ownership": d.female_land_ownership,
                        "entrepreneurship_rate": d.female_entrepreneurship,
                    },
                    "political": {
                        "women_in_parliament": d.women_in_parliament,
                    },
                })
            }
            BankId::Undp => {
                let d = &records.undp;
                json!({
                    "source": source,
                    "country": country,
                    "human_development": {
                        "hdi": d.hdi,
                        "hdi_rank": d.hdi_rank,
                        "category": d.category(),
                    },
                    "gender_indices": {
                        "gender_inequality_index": d.gender_inequality_index,
                        "gender_development_index": d.gender_development_index,
                    },
                    "poverty": {
                        "mpi_headcount": d.mpi_headcount,
                    },
                    "female_indicators": {
                        "life_expectancy": d.life_expectancy_female,
                        "expected_schooling": d.expected_schooling_female,
                        "gni_per_capita": d.gni_per_capita_female,
                    },
                })
            }
            BankId::Climate => {
                let d = &records.climate;
                json!({
                    "source": source,
                    "country": country,
                    "emissions": {
                        "total_mtco2": d.total_emissions_mtco2,
                        "per_capita": d.emissions_per_capita,
                    },
                    "ndc_commitments": {
                        "target_2030": format!("-{}%", d.ndc_target_2030_pct),
                        "ndc_submission_year": d.ndc_year,
                        "net_zero_target": d.net_zero_year,
                    },
                    "adaptation": {
                        "national_adaptation_plan": d.adaptation_plan,
                        "vulnerability_index": d.climate_vulnerability_index,
                    },
                    "energy_and_finance": {
                        "renewable_share": d.renewable_energy_share,
                        "climate_finance_received": d.climate_finance_received_musd,
                    },
                })
            }
            BankId::Who => {
                let d = &records.who;
                json!({
                    "source": source,
                    "country": country,
                    "maternal_health": {
                        "maternal_mortality_ratio": d.maternal_mortality_ratio,
                        "skilled_birth_attendance": d.skilled_birth_attendance,
                        "antenatal_care": d.antenatal_care_coverage,
                    },
                    "reproductive_health": {
                        "contraceptive_prevalence": d.contraceptive_prevalence,
                        "adolescent_birth_rate": d.adolescent_birth_rate,
                        "female_hiv_prevalence": d.female_hiv_prevalence,
                    },
                    "climate_health_nexus": {
                        "heat_wave_mortality_female": d.heat_wave_mortality_female,
                    },
                    "health_system": {
                        "uhc_coverage_index": d.uhc_service_coverage_index,
                    },
                })
            }
            BankId::Ilo => {
                let d = &records.ilo;
                json!({
                    "source": source,
                    "country": country,
                    "employment": {
                        "female_unemployment": d.female_unemployment,
                        "youth_female_neet": d.youth_female_neet,
                        "informal_employment": d.informal_employment_female,
                    },
                    "unpaid_care_work": {
                        "female_hours_per_week": d.unpaid_care_hours_female,
                        "male_hours_per_week": d.unpaid_care_hours_male,
                        "gender_gap": d.care_gap(),
                    },
                    "green_economy": {
                        "female_share_green_jobs": d.green_jobs_female_share,
                    },
                    "work_family_balance": {
                        "maternity_leave_weeks": d.maternity_leave_weeks,
                        "childcare_enrollment": d.childcare_enrollment_0_3,
                    },
                    "leadership": {
                        "female_managers": d.female_managers_share,
                    },
                })
            }
        };
        Some(value)
    }

    /// Country metadata plus every bank's view.
    pub fn country_profile(&self, code: &str) -> Option<Value> {
        let records = self.records(code)?;
        let country = records.country;
        let mut sources = serde_json::Map::new();
        for bank in BankId::ALL {
            if let Some(data) = self.country_data(bank, country.code) {
                sources.insert(bank.as_str().to_string(), data);
            }
        }
        Some(json!({
            "country": country.name,
            "code": country.code,
            "region": country.region,
            "income_level": country.income.as_str(),
            "population_millions": country.population_millions,
            "data_sources": sources,
        }))
    }
}

fn pick<T: Copy>(rng: &mut StdRng, options: &[T]) -> T {
    options[rng.random_range(0..options.len())]
}

fn gen_unwomen(rng: &mut StdRng, country: &Country) -> UnWomenRecord {
    let base: f64 = match country.income {
        IncomeLevel::High => 70.0,
        IncomeLevel::UpperMiddle => 55.0,
        IncomeLevel::LowerMiddle => 45.0,
        IncomeLevel::Low => 38.0,
    };
    let raw: [f64; 6] =
        std::array::from_fn(|_| (base + rng.random_range(-15.0..20.0)).clamp(0.0, 100.0));
    let overall = raw.iter().sum::<f64>() / raw.len() as f64;
    UnWomenRecord {
        overall_score: round_to(overall, 1),
        dimensions: raw.map(|score| round_to(score, 1)),
        women_in_delegation: round_to(rng.random_range(18.0..52.0), 1),
        has_gender_focal_point: rng.random_bool(0.65),
        ndc_gender_references: rng.random_range(5..=45),
    }
}

fn gen_worldbank(rng: &mut StdRng, country: &Country) -> WorldBankRecord {
    let base_labor = match country.income {
        IncomeLevel::High => 65.0,
        IncomeLevel::UpperMiddle => 52.0,
        IncomeLevel::LowerMiddle => 35.0,
        IncomeLevel::Low => 28.0,
    };
    WorldBankRecord {
        female_labor_force_participation: round_to(base_labor + rng.random_range(-10.0..15.0), 1),
        gender_wage_gap: round_to(rng.random_range(10.0..35.0), 1),
        female_account_ownership: round_to(rng.random_range(30.0..90.0), 1),
        female_secondary_education: round_to(rng.random_range(40.0..98.0), 1),
        female_tertiary_education: round_to(rng.random_range(15.0..70.0), 1),
        women_in_parliament: round_to(rng.random_range(8.0..48.0), 1),
        female_land_ownership: round_to(rng.random_range(5.0..45.0), 1),
        female_entrepreneurship: round_to(rng.random_range(15.0..40.0), 1),
    }
}

fn gen_undp(rng: &mut StdRng, country: &Country) -> UndpRecord {
    let base_hdi: f64 = match country.income {
        IncomeLevel::High => 0.92,
        IncomeLevel::UpperMiddle => 0.76,
        IncomeLevel::LowerMiddle => 0.62,
        IncomeLevel::Low => 0.48,
    };
    let hdi = (base_hdi + rng.random_range(-0.08..0.08)).clamp(0.3, 1.0);
    let gii = 1.0 - hdi + rng.random_range(-0.1..0.15);
    UndpRecord {
        hdi: round_to(hdi, 3),
        hdi_rank: 0,
        gender_inequality_index: round_to(gii.clamp(0.05, 0.7), 3),
        gender_development_index: round_to(hdi * (1.0 - gii / 2.0), 3),
        mpi_headcount: round_to(((1.0 - hdi) * 60.0 + rng.random_range(-10.0..10.0)).max(0.0), 1),
        life_expectancy_female: round_to(70.0 + hdi * 15.0 + rng.random_range(-3.0..3.0), 1),
        expected_schooling_female: round_to(8.0 + hdi * 8.0 + rng.random_range(-1.0..1.0), 1),
        gni_per_capita_female: (5000.0 + hdi * 45000.0 + rng.random_range(-5000.0..5000.0))
            .round(),
    }
}

fn gen_climate(rng: &mut StdRng, country: &Country) -> ClimateRecord {
    let base_emissions = match country.income {
        IncomeLevel::High => 8.0,
        IncomeLevel::UpperMiddle => 5.0,
        IncomeLevel::LowerMiddle => 2.0,
        IncomeLevel::Low => 0.5,
    };
    let total = country.population_millions * base_emissions * rng.random_range(0.7..1.3);
    let per_capita = base_emissions * rng.random_range(0.8..1.2);
    let ndc_target_2030_pct = rng.random_range(25..=55);
    let ndc_year = pick(rng, &[2021, 2022, 2023, 2024]);
    let has_net_zero = rng.random_bool(0.6);
    let net_zero_year = pick(rng, &[2050, 2060, 2070]);
    let finance: f64 = rng.random_range(10.0..2000.0);
    ClimateRecord {
        total_emissions_mtco2: round_to(total, 1),
        emissions_per_capita: round_to(per_capita, 2),
        ndc_target_2030_pct,
        ndc_year,
        net_zero_year: has_net_zero.then_some(net_zero_year),
        adaptation_plan: rng.random_bool(0.5),
        climate_vulnerability_index: round_to(rng.random_range(0.2..0.8), 2),
        renewable_energy_share: round_to(rng.random_range(5.0..65.0), 1),
        climate_finance_received_musd: if country.income == IncomeLevel::High {
            0.0
        } else {
            finance.round()
        },
    }
}

fn gen_who(rng: &mut StdRng, country: &Country) -> WhoRecord {
    let base_mmr: f64 = match country.income {
        IncomeLevel::High => 8.0,
        IncomeLevel::UpperMiddle => 45.0,
        IncomeLevel::LowerMiddle => 150.0,
        IncomeLevel::Low => 400.0,
    };
    let african = matches!(
        country.region,
        "East Africa" | "Southern Africa" | "West Africa"
    );
    WhoRecord {
        maternal_mortality_ratio: (base_mmr * rng.random_range(0.6..1.4)).round() as u32,
        skilled_birth_attendance: round_to(
            (100.0 - base_mmr / 5.0 + rng.random_range(-5.0..10.0)).min(100.0),
            1,
        ),
        contraceptive_prevalence: round_to(rng.random_range(25.0..80.0), 1),
        antenatal_care_coverage: round_to(rng.random_range(50.0..98.0), 1),
        adolescent_birth_rate: round_to(rng.random_range(5.0..120.0), 1),
        female_hiv_prevalence: if african {
            round_to(rng.random_range(0.1..8.0), 2)
        } else {
            round_to(rng.random_range(0.05..0.5), 2)
        },
        uhc_service_coverage_index: rng.random_range(35.0f64..85.0).round(),
        heat_wave_mortality_female: round_to(rng.random_range(0.5..15.0), 1),
    }
}

fn gen_ilo(rng: &mut StdRng) -> IloRecord {
    IloRecord {
        female_unemployment: round_to(rng.random_range(3.0..25.0), 1),
        youth_female_neet: round_to(rng.random_range(8.0..45.0), 1),
        unpaid_care_hours_female: round_to(rng.random_range(15.0..45.0), 1),
        unpaid_care_hours_male: round_to(rng.random_range(3.0..15.0), 1),
        informal_employment_female: round_to(rng.random_range(15.0..85.0), 1),
        green_jobs_female_share: round_to(rng.random_range(15.0..45.0), 1),
        female_managers_share: round_to(rng.random_range(15.0..45.0), 1),
        maternity_leave_weeks: rng.random_range(6..=26),
        childcare_enrollment_0_3: round_to(rng.random_range(5.0..65.0), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hub() -> ClimateHub {
        ClimateHub::generate(42, NaiveDate::from_ymd_opt(2026, 1, 15).expect("date"))
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let first = hub();
        let second = hub();
        assert_eq!(first.all(), second.all());

        let other = ClimateHub::generate(7, first.as_of());
        assert_ne!(first.all(), other.all());
    }

    #[test]
    fn hdi_ranks_form_a_permutation() {
        let hub = hub();
        let mut ranks: Vec<_> = hub.all().iter().map(|r| r.undp.hdi_rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=COUNTRIES.len()).collect::<Vec<_>>());

        let best = hub
            .all()
            .iter()
            .find(|r| r.undp.hdi_rank == 1)
            .expect("rank 1");
        assert!(hub.all().iter().all(|r| r.undp.hdi <= best.undp.hdi));
    }

    #[test]
    fn indicators_stay_in_range() {
        for record in hub().all() {
            assert!((0.0..=100.0).contains(&record.unwomen.overall_score));
            assert!((0.2..=0.8).contains(&record.climate.climate_vulnerability_index));
            assert!((0.05..=0.7).contains(&record.undp.gender_inequality_index));
            assert!(record.ilo.care_gap() >= 0.0);
            if record.country.income == IncomeLevel::High {
                assert_eq!(record.climate.climate_finance_received_musd, 0.0);
            }
        }
    }

    #[test]
    fn country_data_is_keyed_by_code_case_insensitively() {
        let hub = hub();
        let data = hub.country_data(BankId::Ilo, "ken").expect("kenya");
        assert_eq!(data["country"], "Kenya");
        assert_eq!(data["source"], "ILO Labour Statistics");
        assert!(hub.country_data(BankId::Ilo, "XXX").is_none());

        let profile = hub.country_profile("SWE").expect("profile");
        assert_eq!(profile["income_level"], "high");
        assert_eq!(
            profile["data_sources"].as_object().map(|map| map.len()),
            Some(6)
        );
    }

    #[test]
    fn bank_ids_parse_and_describe_sources() {
        assert_eq!("WorldBank".parse::<BankId>(), Ok(BankId::WorldBank));
        assert!("imf".parse::<BankId>().is_err());

        let sources = hub().sources();
        let ids: Vec<_> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["unwomen", "worldbank", "undp", "climate", "who", "ilo"]);
        assert_eq!(sources[3].color, "#4CAF50");
    }
}
