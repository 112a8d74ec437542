//! Deterministic sample content and startup defaults.
//!
//! The same data set backs two different jobs: it is the fallback served by
//! read endpoints when the relational store is unreachable, and it is the
//! initial content inserted (idempotently) into an empty database on boot.

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel};
use serde_json::json;
use tracing::info;

use crate::entity::{author, blog_post, email_config, email_template};

/// Fixed timestamp literal; the arguments are compile-time constants.
fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

pub fn sample_authors() -> Vec<author::Model> {
    vec![author::Model {
        id: "seed-author-vimo".into(),
        name: "VI&MO Team".into(),
        slug: "vimo-team".into(),
        bio: "Profesionálny sťahovací tím s dlhoročnými skúsenosťami v Bratislave a okolí.".into(),
        email: Some("info@viamo.sk".into()),
        avatar_url: None,
        website: Some("https://viamo.sk".into()),
        created_at: at(2024, 10, 1, 8),
    }]
}

pub fn sample_blog_posts() -> Vec<blog_post::Model> {
    vec![
        blog_post::Model {
            id: "seed-post-priprava".into(),
            slug: "ako-sa-pripravit-na-stahovanie-bytu".into(),
            title: "Ako sa pripraviť na sťahovanie bytu v Bratislave".into(),
            excerpt: "Pripravte sa na bezproblémové sťahovanie s našim kompletným návodom. \
                      Zistite, čo zabaliť, ako zabezpečiť veci a čo pripraviť vopred."
                .into(),
            content: r#"# Ako sa pripraviť na sťahovanie bytu v Bratislave

Sťahovanie bytu môže byť stresujúce, ale s dobrým plánovaním to zvládnete bez problémov.

## 1. Začnite plánovať aspoň 2 týždne vopred

Ideálne je začať s prípravami minimálne 2 týždne pred termínom sťahovania. Dá vám to dostatok času na:
- Zozbieranie baliacich materiálov
- Postupné balenie vecí
- Zrušenie a nahlásenie zmeny adresy
- Kontaktovanie sťahovacej firmy

## 2. Pripravte si baliacie materiály

Pre sťahovanie budete potrebovať:
- **Kartónové krabice** (rôzne veľkosti)
- **Bublinkové fólie** na krehké predmety
- **Lepiaca páska** na uzatvorenie krabíc
- **Permanentný fix** na označenie krabíc

## 3. Balte postupne a systematicky

Začnite s vecami, ktoré nepoužívate každý deň. Kuchyňu a kúpeľňu balte ako posledné.

**Tip:** Označte každú krabicu s obsahom a miestnosťou, kam patrí.

## 4. Zbavte sa nepotrebných vecí

Sťahovanie je ideálna príležitosť na vypratanie. Darujte veci, ktoré nepoužívate, a vyhoďte poškodené.

## 5. Kontaktujte profesionálov

Pri výbere sťahovacej firmy dbajte na referencie, poistenie zodpovednosti a transparentný cenník.

## Záver

S týmito tipmi bude vaše sťahovanie v Bratislave plynulé a bez stresu. Ak potrebujete pomoc, neváhajte nás kontaktovať pre nezáväznú cenovú ponuku."#
                .into(),
            category: "Tipy a návody".into(),
            tags: json!(["sťahovanie", "príprava", "balenie", "Bratislava"]),
            featured_image: None,
            author_id: Some("seed-author-vimo".into()),
            author_name: "VI&MO Team".into(),
            published_at: at(2024, 11, 5, 9),
            reading_time: 5,
            meta_description: Some(
                "Kompletný návod, ako sa pripraviť na sťahovanie bytu v Bratislave. \
                 Tipy na balenie, plánovanie a výber sťahovacej firmy."
                    .into(),
            ),
            featured: 1,
        },
        blog_post::Model {
            id: "seed-post-stres".into(),
            slug: "5-tipov-ako-znizit-stres-pri-stahovani".into(),
            title: "5 tipov, ako znížiť stres pri sťahovaní".into(),
            excerpt: "Sťahovanie nemusí byť chaos. Pozrite si naše overené tipy na organizáciu, \
                      balenie a komunikáciu s firmou, ktoré vám ušetria nervy."
                .into(),
            content: r#"# 5 tipov, ako znížiť stres pri sťahovaní

Sťahovanie je medzi najstresujúcejšími životnými udalosťami. Tu je 5 overených tipov, ako si ho uľahčiť.

## 1. Vytvorte si podrobný harmonogram

Naplánujte si každý deň pred sťahovaním. Písaný plán vám pomôže nič nezabudnúť.

## 2. Použite systém farebného označovania

- **Modrá** - spálňa
- **Zelená** - kuchyňa
- **Žltá** - obývačka
- **Červená** - kúpeľňa

Farebné označenie zrýchli rozbaľovanie v novom byte.

## 3. Pripravte si "prvý deň" kufríky

Do každého kufríka dejte základné toaletné potreby, prezlečenie, nabíjačky a dôležité dokumenty.

## 4. Komunikujte jasne so sťahovákom

Ukážte, čo sa sťahuje a čo nie, upozornite na krehké predmety a dohodnite sa na presnom čase.

## 5. Požiadajte o pomoc

Či už rodinu, priateľov alebo profesionálov - nerobte všetko sami.

---

Potrebujete profesionálov na vaše sťahovanie v Bratislave? Kontaktujte nás ešte dnes!"#
                .into(),
            category: "Tipy a návody".into(),
            tags: json!(["stres", "organizácia", "sťahovanie", "tipy"]),
            featured_image: None,
            author_id: Some("seed-author-vimo".into()),
            author_name: "VI&MO Team".into(),
            published_at: at(2024, 11, 12, 9),
            reading_time: 4,
            meta_description: Some(
                "Päť praktických tipov, ako zvládnuť sťahovanie bez stresu. \
                 Organizácia, balenie a komunikácia s profesionálmi."
                    .into(),
            ),
            featured: 0,
        },
        blog_post::Model {
            id: "seed-post-vypratavanie".into(),
            slug: "vypratavanie-bytu-prakticky-checklist".into(),
            title: "Vypratávanie bytu – praktický checklist".into(),
            excerpt: "Potrebujete vypratať byt pred sťahovaním alebo predajom? Náš checklist \
                      vám pomôže nezabudnúť na žiadnu dôležitú vec."
                .into(),
            content: r#"# Vypratávanie bytu – praktický checklist

Vypratávanie bytu je často náročnejšie ako samotné sťahovanie. Tu je kompletný checklist, ktorý vám uľahčí prácu.

## 1. Miestnosť po miestnosti

### Kuchyňa
- Prázdna chladnička a mraznička
- Vyčistené spotrebiče
- Prázdne skrinky a zásuvky

### Spálňa
- Prázdne skrine
- Vytriedené oblečenie

### Kúpeľňa
- Prázdne skrinky
- Odvoz starých produktov

### Obývačka
- Roztriedené knihy
- Výber nábytku na odvoz

## 2. Triedenie odpadu

Dodržiavajte separáciu odpadu a odovzdajte elektrozariadenia na správne miesta.

## 3. Odvoz odpadu

Môžete využiť komunálny odpad, zberný dvor alebo profesionálnu firmu na odvoz.

## 4. Záverečné upratovanie

Po vypratávaní umyte podlahy, vyčistite okná a vyvetrajte priestory.

## Zhrnutie

S týmto checklistom zvládnete vypratávanie systematicky a efektívne. Ak potrebujete pomoc s odvozom odpadu a vypratávaním v Bratislave, sme tu pre vás."#
                .into(),
            category: "Návody".into(),
            tags: json!(["vypratávanie", "checklist", "upratovanie", "organizácia"]),
            featured_image: None,
            author_id: Some("seed-author-vimo".into()),
            author_name: "VI&MO Team".into(),
            published_at: at(2024, 11, 19, 9),
            reading_time: 6,
            meta_description: Some(
                "Praktický checklist pre vypratávanie bytu. Krok za krokom návod, čo treba \
                 vyčistiť, vyhodiť a ako sa zbaviť nepotrebných vecí."
                    .into(),
            ),
            featured: 0,
        },
    ]
}

/// Initial singleton configuration. Disabled until an administrator fills in
/// real SMTP credentials.
pub fn default_email_config() -> email_config::Model {
    email_config::Model {
        id: email_config::SINGLETON_ID.into(),
        smtp_host: "smtp.websupport.sk".into(),
        smtp_port: 465,
        smtp_user: "info@viamo.sk".into(),
        smtp_password: String::new(),
        from_name: "VI&MO Sťahovanie".into(),
        from_email: "info@viamo.sk".into(),
        reply_to: "info@viamo.sk".into(),
        bcc: None,
        enabled: false,
        created_at: at(2024, 10, 1, 8),
        updated_at: at(2024, 10, 1, 8),
    }
}

pub fn default_email_templates() -> Vec<email_template::Model> {
    vec![
        email_template::Model {
            id: "template-contact".into(),
            key: "contact".into(),
            name: "Notifikácia o novom dopyte".into(),
            subject: "Nový dopyt od {{name}}".into(),
            html_content: r#"<h2>Nový dopyt z webu</h2>
<p><strong>Meno:</strong> {{name}}</p>
<p><strong>Email:</strong> {{email}}</p>
<p><strong>Telefón:</strong> {{phone}}</p>
{{#if apartment_size}}<p><strong>Veľkosť bytu:</strong> {{apartment_size}}</p>{{/if}}
{{#if move_date}}<p><strong>Termín sťahovania:</strong> {{move_date}}</p>{{/if}}
<p><strong>Správa:</strong></p>
<p>{{message}}</p>
<hr>
<p>Odoslané: {{submitted_at}}</p>"#
                .into(),
            text_content: r#"Nový dopyt z webu

Meno: {{name}}
Email: {{email}}
Telefón: {{phone}}
{{#if apartment_size}}Veľkosť bytu: {{apartment_size}}
{{/if}}{{#if move_date}}Termín sťahovania: {{move_date}}
{{/if}}
Správa:
{{message}}

Odoslané: {{submitted_at}}"#
                .into(),
            is_default: true,
            enabled: true,
            created_at: at(2024, 10, 1, 8),
            updated_at: at(2024, 10, 1, 8),
        },
        email_template::Model {
            id: "template-confirmation".into(),
            key: "confirmation".into(),
            name: "Potvrdenie prijatia dopytu".into(),
            subject: "Ďakujeme za váš dopyt".into(),
            html_content: r#"<h2>Dobrý deň, {{name}}!</h2>
<p>Ďakujeme za váš dopyt. Ozveme sa vám čo najskôr s nezáväznou cenovou ponukou.</p>
<p>Kópia vašej správy:</p>
<blockquote>{{message}}</blockquote>
<p>S pozdravom,<br>VI&amp;MO Sťahovanie</p>"#
                .into(),
            text_content: r#"Dobrý deň, {{name}}!

Ďakujeme za váš dopyt. Ozveme sa vám čo najskôr s nezáväznou cenovou ponukou.

Kópia vašej správy:
{{message}}

S pozdravom,
VI&MO Sťahovanie"#
                .into(),
            is_default: true,
            enabled: true,
            created_at: at(2024, 10, 1, 8),
            updated_at: at(2024, 10, 1, 8),
        },
    ]
}

/// Seed initial content into the relational store. Safe to run on every
/// boot; existing rows win every conflict.
pub async fn seed_defaults(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut authors_inserted = 0u32;
    for model in sample_authors() {
        let result = author::Entity::insert(model.into_active_model().reset_all())
            .on_conflict(
                OnConflict::column(author::Column::Slug)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        match result {
            Ok(_) => authors_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }
    if authors_inserted > 0 {
        info!("Seeded {} new authors", authors_inserted);
    }

    let mut posts_inserted = 0u32;
    for model in sample_blog_posts() {
        let result = blog_post::Entity::insert(model.into_active_model().reset_all())
            .on_conflict(
                OnConflict::column(blog_post::Column::Slug)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        match result {
            Ok(_) => posts_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }
    if posts_inserted > 0 {
        info!("Seeded {} new blog posts", posts_inserted);
    }

    let result = email_config::Entity::insert(default_email_config().into_active_model().reset_all())
        .on_conflict(
            OnConflict::column(email_config::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;
    match result {
        Ok(_) => info!("Seeded default email configuration"),
        Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e),
    }

    let mut templates_inserted = 0u32;
    for model in default_email_templates() {
        let result = email_template::Entity::insert(model.into_active_model().reset_all())
            .on_conflict(
                OnConflict::column(email_template::Column::Key)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        match result {
            Ok(_) => templates_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }
    if templates_inserted > 0 {
        info!("Seeded {} new email templates", templates_inserted);
    }

    Ok(())
}
