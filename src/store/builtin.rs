// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in catalog for the «Лаура» enclosure complex.

use super::catalog_file::{AnimalRecord, CatalogRecord, StoreError, ZoneRecord};
use crate::model::{AnimalCategory, Catalog, ConservationStatus, ZoneKind};

/// Local photo paths follow `/animals/<id>/<n>.jpg`, numbered from 1.
fn local_images(id: &str, count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("/animals/{id}/{n}.jpg")).collect()
}

#[allow(clippy::too_many_arguments)]
fn animal(
    id: &str,
    name: &str,
    scientific_name: &str,
    category: AnimalCategory,
    short_description: &str,
    description: &str,
    image_count: usize,
    conservation_status: ConservationStatus,
) -> AnimalRecord {
    AnimalRecord {
        id: id.to_owned(),
        name: name.to_owned(),
        scientific_name: scientific_name.to_owned(),
        short_description: short_description.to_owned(),
        description: description.to_owned(),
        images: local_images(id, image_count),
        category,
        conservation_status,
    }
}

fn zone(id: &str, animal_id: &str, path: &str, label_x: f64, label_y: f64) -> ZoneRecord {
    ZoneRecord {
        id: id.to_owned(),
        animal_id: animal_id.to_owned(),
        path: path.to_owned(),
        label_x,
        label_y,
        kind: ZoneKind::Enclosure,
    }
}

pub fn builtin_record() -> CatalogRecord {
    let animals = vec![
        animal(
            "wolf",
            "Волк",
            "Canis lupus cubanensis",
            AnimalCategory::Mammal,
            "Умный хищник, живущий стаями.",
            "Кавказский волк — важный санитар леса. В вольерном комплексе живет пара, которая часто демонстрирует сложные социальные отношения. Волки активны и любопытны, часто наблюдают за посетителями.",
            3,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "sika",
            "Пятнистый олень",
            "Cervus nippon",
            AnimalCategory::Mammal,
            "Грациозный олень с пятнистой шкурой.",
            "Пятнистый олень был акклиматизирован на Кавказе. Летом их окрас ярко-рыжий с белыми пятнами, а зимой тускнеет. Это очень осторожные и быстрые животные.",
            2,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "chamois",
            "Серна Кавказская",
            "Rupicapra rupicapra caucasica",
            AnimalCategory::Mammal,
            "Ловкий горный житель.",
            "Серны — виртуозы скалолазания. Их копыта устроены так, что позволяют удерживаться на крошечных уступах. Обитают в высокогорье, но в вольере чувствуют себя комфортно.",
            2,
            ConservationStatus::NearThreatened,
        ),
        animal(
            "red_deer",
            "Кавказский благородный олень",
            "Cervus elaphus maral",
            AnimalCategory::Mammal,
            "Гордость кавказских лесов.",
            "Кавказский марал — один из самых крупных подвидов благородного оленя. Самцы носят ветвистые рога, которые сбрасывают каждый год. Осенью можно услышать их мощный рев.",
            2,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "zubr",
            "Зубр",
            "Bison bonasus",
            AnimalCategory::Mammal,
            "Исполин леса.",
            "Самое крупное наземное млекопитающее Европы. Кавказский заповедник — главное место восстановления популяции горного зубра. В вольере можно оценить их истинные размеры.",
            3,
            ConservationStatus::Endangered,
        ),
        animal(
            "boar",
            "Дикий Кабан",
            "Sus scrofa",
            AnimalCategory::Mammal,
            "Всеядный обитатель леса.",
            "Кабаны умны и социальны. Они играют важную роль в экосистеме, рыхля землю в поисках пищи. Поросята рождаются полосатыми для маскировки.",
            2,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "roe",
            "Косуля",
            "Capreolus capreolus",
            AnimalCategory::Mammal,
            "Самый маленький олень Европы.",
            "Изящные и легкие животные. У самцов небольшие рожки. Косули предпочитают светлые леса и поляны. При опасности издают характерный лающий звук.",
            2,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "badger",
            "Барсук",
            "Meles meles",
            AnimalCategory::Mammal,
            "Ночной житель нор.",
            "Барсук — чистоплотное животное, строящее сложные системы нор. Ведет ночной образ жизни.",
            1,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "raccoon",
            "Енот-полоскун",
            "Procyon lotor",
            AnimalCategory::Mammal,
            "Ловкий и хитрый.",
            "Инвазивный вид для Кавказа. Известен своей привычкой \"полоскать\" еду в воде и ловкими лапками.",
            1,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "raccoon_dog",
            "Енотовидная собака",
            "Nyctereutes procyonoides",
            AnimalCategory::Mammal,
            "Похожа на енота, но собака.",
            "Единственный представитель псовых, который впадает в зимнюю спячку.",
            1,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "fox",
            "Лисица",
            "Vulpes vulpes",
            AnimalCategory::Mammal,
            "Рыжая плутовка.",
            "Обыкновенная лисица широко распространена на Кавказе. Умный и осторожный хищник.",
            2,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "steppe_eagle",
            "Степной орел",
            "Aquila nipalensis",
            AnimalCategory::Bird,
            "Обитатель открытых пространств.",
            "Крупный орел, гнездящийся на земле. Питается грызунами.",
            1,
            ConservationStatus::Endangered,
        ),
        animal(
            "falcon",
            "Сокол сапсан",
            "Falco peregrinus",
            AnimalCategory::Bird,
            "Самая быстрая птица.",
            "В пикирующем полете способен развивать скорость свыше 300 км/ч.",
            1,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "white_tailed_eagle",
            "Орлан-белохвост",
            "Haliaeetus albicilla",
            AnimalCategory::Bird,
            "Крупнейший хищник неба.",
            "Огромная птица с размахом крыльев до 2.5 метров. Обитает у водоемов.",
            1,
            ConservationStatus::LeastConcern,
        ),
        animal(
            "swans",
            "Лебеди и Гуси",
            "Cygnus",
            AnimalCategory::Bird,
            "Водоплавающие птицы.",
            "Пруд является домом для лебедей и гусей. Это спокойный уголок комплекса, где можно понаблюдать за жизнью водоплавающих птиц.",
            2,
            ConservationStatus::LeastConcern,
        ),
    ];

    let mut pond = zone(
        "z-swans",
        "swans",
        "M 700,380 L 960,380 Q 990,380 980,450 Q 960,560 700,540 Q 680,460 700,380 Z",
        840.0,
        460.0,
    );
    pond.kind = ZoneKind::Pond;

    let zones = vec![
        // Top row.
        zone("z-wolf", "wolf", "M 20,40 L 180,40 L 180,280 L 20,280 Z", 100.0, 160.0),
        zone("z-sika", "sika", "M 200,40 L 360,40 L 360,280 L 200,280 Z", 280.0, 160.0),
        zone("z-chamois", "chamois", "M 380,40 L 520,40 L 520,280 L 380,280 Z", 450.0, 160.0),
        zone("z-red_deer", "red_deer", "M 540,40 L 730,40 L 730,280 L 540,280 Z", 635.0, 160.0),
        zone(
            "z-zubr",
            "zubr",
            "M 750,40 L 980,40 L 980,320 L 850,320 L 750,280 Z",
            865.0,
            180.0,
        ),
        // Bottom row.
        zone("z-boar", "boar", "M 60,340 L 220,340 L 220,540 L 60,540 Z", 140.0, 440.0),
        zone("z-roe", "roe", "M 240,340 L 380,340 L 380,540 L 240,540 Z", 310.0, 440.0),
        // Small predators share the x=400..520, y=340..540 block.
        zone("z-badger", "badger", "M 400,340 L 520,340 L 520,390 L 400,390 Z", 460.0, 370.0),
        zone("z-raccoon", "raccoon", "M 400,400 L 520,400 L 520,450 L 400,450 Z", 460.0, 430.0),
        zone(
            "z-raccoon-dog",
            "raccoon_dog",
            "M 400,460 L 455,460 L 455,540 L 400,540 Z",
            427.0,
            500.0,
        ),
        zone("z-fox", "fox", "M 465,460 L 520,460 L 520,540 L 465,540 Z", 492.0, 500.0),
        // Birds share the x=560..680, y=340..520 block, right of the entrance path.
        zone(
            "z-steppe_eagle",
            "steppe_eagle",
            "M 560,340 L 615,340 L 615,520 L 560,520 Z",
            587.0,
            430.0,
        ),
        zone("z-falcon", "falcon", "M 625,340 L 680,340 L 680,425 L 625,425 Z", 652.0, 382.0),
        zone(
            "z-white_tailed_eagle",
            "white_tailed_eagle",
            "M 625,435 L 680,435 L 680,520 L 625,520 Z",
            652.0,
            477.0,
        ),
        pond,
    ];

    CatalogRecord { animals, zones }
}

/// The catalog compiled into the binary.
pub fn builtin_catalog() -> Result<Catalog, StoreError> {
    builtin_record().into_catalog()
}

#[cfg(test)]
mod tests {
    use super::builtin_catalog;
    use crate::model::{ConservationStatus, Point};

    #[test]
    fn every_zone_resolves_to_an_animal() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.animals().count(), 15);
        assert_eq!(catalog.zones().len(), 15);
        assert!(catalog.dangling_zones().is_empty());
    }

    #[test]
    fn only_the_swan_pond_is_water() {
        let catalog = builtin_catalog().unwrap();
        let ponds: Vec<&str> = catalog
            .zones()
            .iter()
            .filter(|zone| zone.is_pond())
            .map(|zone| zone.id().as_str())
            .collect();
        assert_eq!(ponds, vec!["z-swans"]);
    }

    #[test]
    fn label_anchors_hit_their_own_zone() {
        let catalog = builtin_catalog().unwrap();
        for zone in catalog.zones() {
            let hit = catalog.zone_at(zone.label_anchor()).map(|z| z.id().as_str());
            assert_eq!(hit, Some(zone.id().as_str()));
        }
        assert!(catalog.zone_at(Point::new(540.0, 570.0)).is_none());
    }

    #[test]
    fn zubr_is_endangered_with_three_photos() {
        let catalog = builtin_catalog().unwrap();
        let zubr = catalog.animal("zubr").unwrap();
        assert_eq!(zubr.conservation_status(), ConservationStatus::Endangered);
        assert_eq!(zubr.images()[2], "/animals/zubr/3.jpg");
    }
}
