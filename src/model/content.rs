//! Static site content.
//!
//! Copy, menu, services catalogue and footer details. The engine renders this
//! but never reasons about it. A built-in catalogue ships with the crate;
//! a TOML file can replace any top-level section of it.

use super::menu::Menu;
use super::error::ContentError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Logo text and the small caption shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Brand {
    /// Logo text.
    pub name: String,
    /// Caption drawn beside the logo.
    pub caption: String,
}

/// A heading followed by paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyBlock {
    /// Heading line.
    pub heading: String,
    /// Paragraphs under the heading.
    #[serde(default)]
    pub lines: Vec<String>,
}

impl CopyBlock {
    /// Block from borrowed strings.
    pub fn new(heading: &str, lines: &[&str]) -> Self {
        Self {
            heading: heading.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// A titled card with an optional kicker (step number, English subtitle).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    /// Card title.
    pub title: String,
    /// Small line above the title.
    #[serde(default)]
    pub kicker: Option<String>,
    /// Card text.
    pub body: String,
}

impl Card {
    fn new(title: &str, kicker: Option<&str>, body: &str) -> Self {
        Self {
            title: title.to_string(),
            kicker: kicker.map(str::to_string),
            body: body.to_string(),
        }
    }
}

/// Landing page copy, shared by the desktop and mobile layouts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandingCopy {
    /// Opening block.
    pub hero: CopyBlock,
    /// Why-us cards.
    pub strengths: Vec<Card>,
    /// Practice area teasers.
    pub practice: Vec<Card>,
    /// Numbered process steps.
    pub process: Vec<Card>,
    /// Closing call to action.
    pub closing: CopyBlock,
}

/// About page copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutCopy {
    /// Page heading.
    pub hero: CopyBlock,
    /// Greeting from the representative.
    pub greeting: CopyBlock,
    /// Name used to sign the greeting.
    pub signature: String,
}

/// One practice area on the services page. `id` doubles as the scroll-spy anchor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceEntry {
    /// Anchor id, unique across the catalogue.
    pub id: String,
    /// Korean title.
    pub title: String,
    /// English subtitle.
    pub eng_title: String,
    /// One-line summary.
    pub summary: String,
    /// Detail bullets.
    #[serde(default)]
    pub details: Vec<String>,
}

/// Location page details. The map is an embed URL the host cannot render,
/// so it is shown as a framed placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationInfo {
    /// Office name.
    pub office: String,
    /// Street address.
    pub address: String,
    /// Map embed URL.
    pub map_embed_url: String,
    /// Directions by public transport.
    #[serde(default)]
    pub transit: Vec<String>,
}

/// Footer business and contact details.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterInfo {
    /// Representative customs broker.
    pub representative: String,
    /// Business registration number.
    pub business_number: String,
    /// Office address.
    pub address: String,
    /// Telephone.
    pub tel: String,
    /// Fax.
    pub fax: String,
    /// Contact email.
    pub email: String,
    /// Copyright line.
    pub copyright: String,
}

/// All content the site renders.
///
/// Missing top-level sections in a TOML override fall back to the built-in copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteContent {
    /// Logo.
    pub brand: Brand,
    /// Navigation menu.
    pub menu: Menu,
    /// Landing page copy.
    pub landing: LandingCopy,
    /// About page copy.
    pub about: AboutCopy,
    /// Services catalogue in page order.
    pub services: Vec<ServiceEntry>,
    /// Location page.
    pub location: LocationInfo,
    /// Footer.
    pub footer: FooterInfo,
}

impl SiteContent {
    /// Load a content override from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ContentError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let content: SiteContent = toml::from_str(&raw).map_err(|e| ContentError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        content.validate()?;
        Ok(content)
    }

    /// Check the invariants the engine relies on.
    ///
    /// Service ids are scroll-spy anchors: they must be non-empty and unique.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.menu.items.is_empty() {
            return Err(ContentError::EmptyMenu);
        }
        let mut seen = HashSet::new();
        for service in &self.services {
            if service.id.trim().is_empty() {
                return Err(ContentError::EmptyServiceId {
                    title: service.title.clone(),
                });
            }
            if !seen.insert(service.id.as_str()) {
                return Err(ContentError::DuplicateServiceId(service.id.clone()));
            }
        }
        Ok(())
    }

    /// Service ids in page order.
    pub fn service_ids(&self) -> Vec<String> {
        self.services.iter().map(|s| s.id.clone()).collect()
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            brand: Brand::default(),
            menu: Menu::default(),
            landing: LandingCopy::default(),
            about: AboutCopy::default(),
            services: builtin_services(),
            location: LocationInfo::default(),
            footer: FooterInfo::default(),
        }
    }
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: "PROS".to_string(),
            caption: "관세사무소".to_string(),
        }
    }
}

impl Default for LandingCopy {
    fn default() -> Self {
        Self {
            hero: CopyBlock::new(
                "관세·무역 실무, 프로답게 해결합니다",
                &[
                    "Customs by Professional Standards",
                    "처음 수입을 시작하는 개인사업자부터 수출입 구조를 정비하려는 중견기업까지.",
                    "규모와 상황에 맞춘 실무 대응.",
                    "From individual importers to mid-sized enterprises. Tailored customs solutions.",
                ],
            ),
            strengths: vec![
                Card::new(
                    "빠른 대응",
                    Some("Quick Response"),
                    "문의 후 24시간 이내 1차 회신. 긴급 사안 당일 대응. 실시간 진행 상황 공유.",
                ),
                Card::new(
                    "전문 분야",
                    Some("Expertise"),
                    "화장품·건기식·전자제품 등 까다로운 품목 다수 경험. 중견기업 FTA 자문 다수.",
                ),
                Card::new(
                    "체계적 관리",
                    Some("Systematic"),
                    "사전 리스크 진단, 체계적인 문서 관리, 재발 방지 시스템.",
                ),
            ],
            practice: vec![
                Card::new("수출입 통관", None, "처음 수입부터 정기 거래까지, 품목과 거래 구조에 맞춘 통관 설계"),
                Card::new("품목분류(HS)", None, "사전 검토로 리스크 제거, 분쟁 시 논리적 대응과 유권해석 신청"),
                Card::new("FTA 컨설팅", None, "원산지 판정부터 검증 대응, 사후관리 체계 구축까지"),
                Card::new("관세 환급", None, "환급 가능성 검토부터 서류 준비까지 일괄 지원"),
                Card::new("관세조사 대응", None, "통보 즉시 리스크 진단, 대응 시나리오와 자료 정리"),
                Card::new("전자상거래 자문", None, "온라인 판매 수입부터 해외진출까지 통관 구조 사전 설계"),
            ],
            process: vec![
                Card::new("상황 파악", Some("01"), "품목·거래구조·현재 이슈를 듣고 핵심 리스크를 판단합니다"),
                Card::new("대응 설계", Some("02"), "법령 근거와 실무 경험을 바탕으로 해결 방향을 제시합니다"),
                Card::new("실행 지원", Some("03"), "서류 준비부터 세관 대응까지 필요한 단계를 직접 진행합니다"),
                Card::new("결과 정리", Some("04"), "완료 내역을 문서로 남기고 다음을 대비한 포인트를 전달합니다"),
            ],
            closing: CopyBlock::new(
                "상담 신청",
                &[
                    "상황을 간단히 남겨주시면 24시간 이내 회신드립니다.",
                    "수출입 통관 · FTA/원산지 · 조사 대응 · 전자상거래",
                ],
            ),
        }
    }
}

impl Default for AboutCopy {
    fn default() -> Self {
        Self {
            hero: CopyBlock::new(
                "고객의 비즈니스를 지키는 원칙",
                &["프로스 관세사무소는 정확한 판단과 깊이 있는 전문성으로 귀하의 무역 비즈니스에 확실한 답을 드립니다."],
            ),
            greeting: CopyBlock::new(
                "대표 관세사 인사말",
                &[
                    "안녕하십니까. 프로스 관세사무소입니다.",
                    "복잡해지는 글로벌 무역 환경 속에서 관세사는 기업의 리스크를 관리하고 이익을 극대화하는 전략적 파트너가 되어야 합니다.",
                    "문제를 해결하는 것을 넘어, 문제가 발생하지 않는 구조를 만드는 것. 그것이 프로스가 추구하는 전문가의 자세입니다.",
                    "고객의 성공적인 비즈니스 파트너가 되겠습니다.",
                ],
            ),
            signature: "대표관세사 김준성 올림".to_string(),
        }
    }
}

impl Default for LocationInfo {
    fn default() -> Self {
        Self {
            office: "프로스 관세사무소".to_string(),
            address: "서울특별시 중구 서소문로 89, 17층".to_string(),
            map_embed_url: "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3162.673334251394!2d126.96818177714539!3d37.56275942434263".to_string(),
            transit: vec![
                "지하철 : 시청역 / 서대문역 인근".to_string(),
                "주차 : 건물 내 주차 가능 (방문 전 문의)".to_string(),
            ],
        }
    }
}

impl Default for FooterInfo {
    fn default() -> Self {
        Self {
            representative: "김준성".to_string(),
            business_number: "244-25-02033".to_string(),
            address: "서울특별시 중구 서소문로 89, 17층 BD-1710호".to_string(),
            tel: "0505-055-2324".to_string(),
            fax: "0505-065-2324".to_string(),
            email: "keunbro@customs.pro".to_string(),
            copyright: "© 2024 프로스 관세사무소. All rights reserved.".to_string(),
        }
    }
}

fn service(id: &str, title: &str, eng_title: &str, summary: &str, details: &[&str]) -> ServiceEntry {
    ServiceEntry {
        id: id.to_string(),
        title: title.to_string(),
        eng_title: eng_title.to_string(),
        summary: summary.to_string(),
        details: details.iter().map(|d| d.to_string()).collect(),
    }
}

fn builtin_services() -> Vec<ServiceEntry> {
    vec![
        service(
            "import",
            "수입통관 컨설팅",
            "Import Clearance",
            "복잡한 수입 요건 검토부터 세액 산출, 통관 이후의 관리까지 수입 프로세스의 전 과정을 지원합니다.",
            &[
                "수입 신고 전 요건 구비(식품, 전기, 전파 등) 및 사전 세액 심사",
                "거래 단계별 과세가격 적정성 검토 및 잠정/확정 신고 대행",
                "긴급 화물을 위한 입항 전 신고 및 보세구역 도착 전 신고 처리",
                "수입 이후 관세조사 대비를 위한 서류 보관 및 데이터 정합성 관리",
            ],
        ),
        service(
            "export",
            "수출통관 및 환급",
            "Export & Drawback",
            "신속한 수출 신고 처리와 더불어 관세 환급을 통한 제조 원가 절감 솔루션을 제공합니다.",
            &[
                "수출 신고 필증 발급 및 선적 일정에 맞춘 신속 통관 처리",
                "간이정액환급 및 개별환급 시뮬레이션을 통한 환급액 극대화 전략 수립",
                "재수입 면세 요건 검토 및 사후 관리 지원",
            ],
        ),
        service(
            "hscode",
            "HS CODE 품목분류",
            "HS Classification",
            "정확한 품목분류를 통해 세율 오류로 인한 추징 리스크를 사전에 차단합니다.",
            &[
                "신규 취급 품목에 대한 사전 HS CODE 정밀 분석 및 분류",
                "품목분류 사전심사 신청 대행 및 의견서 작성",
                "오류 품목분류 수정 신고 및 경정 청구 진행",
            ],
        ),
        service(
            "consulting",
            "관세 · 외환 심사 자문",
            "Customs Valuation & Audit",
            "관세평가와 외환거래법 이슈를 종합적으로 진단하여 컴플라이언스 리스크를 해소합니다.",
            &[
                "특수관계자 과세가격 사전약정(ACVA) 컨설팅 및 승인 대행",
                "외국환거래법상 자본거래, 상계, 제3자 지급 등 신고 의무 검토",
                "정기 법인 심사 및 기획 심사 사전 진단",
            ],
        ),
        service(
            "fta",
            "FTA 및 원산지 관리",
            "FTA & Origin Management",
            "FTA 혜택을 극대화하고 원산지 검증 리스크에 대비하는 체계를 구축합니다.",
            &[
                "품목별/협정별 원산지 결정 기준 충족 여부 판정",
                "원산지 증명서 발급 대행 및 인증수출자 취득 컨설팅",
                "상대국 세관의 원산지 사후 검증 대응",
            ],
        ),
        service(
            "risk",
            "권리구제 및 리스크 대응",
            "Risk Management",
            "부당한 과세 처분에 대한 불복 절차와 관세 형사 사건 등 위기 상황에서 권익을 보호합니다.",
            &[
                "과세전적부심사 청구 및 심판청구 대리",
                "관세법 위반 조사 시 조사 입회 및 의견 진술",
                "세관의 기업 심사 대응 전략 수립 및 현장 대응 지원",
            ],
        ),
    ]
}
