use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chrono::NaiveDate;
use gradekeeper_core::block::process_study_block;
use gradekeeper_core::model::{Component, Course, StudyBlock, Subcomponent};
use gradekeeper_core::scale::GradeScale;

fn make_component(course: usize, idx: usize, items: usize, drop: usize) -> Component {
    Component {
        id: format!("c{course}-{idx}"),
        name: "Assignments".into(),
        subject_weighting: 0.25,
        number_of_subcomponents_to_drop_lowest: drop,
        subcomponents: (0..items)
            .map(|i| Subcomponent {
                id: format!("c{course}-{idx}-{i}"),
                name: format!("Assignment {}", i + 1),
                grade_value_percentage: ((i * 37 + course * 11) % 100) as f64 / 100.0,
                is_completed: i % 4 != 3,
            })
            .collect(),
    }
}

fn make_block(courses: usize, items: usize) -> StudyBlock {
    StudyBlock {
        id: "bench".into(),
        name: "Benchmark".into(),
        start_date: NaiveDate::from_ymd_opt(2024, 2, 26).unwrap_or_default(),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap_or_default(),
        courses: (0..courses)
            .map(|c| Course {
                id: format!("c{c}"),
                study_block_id: "bench".into(),
                course_code_name: "BENCH".into(),
                course_code_number: c.to_string(),
                long_name: String::new(),
                color: "#3b82f6".into(),
                components: (0..4).map(|i| make_component(c, i, items, 1)).collect(),
            })
            .collect(),
    }
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let scale = GradeScale::default();

    group.bench_function("university_scale", |b| {
        b.iter(|| scale.resolve(black_box(0.7342)))
    });

    let wide = GradeScale::from_cutoffs((0..100).map(|i| (i as f64 / 100.0, format!("G{i}"))))
        .unwrap_or_default();
    group.bench_function("100_cutoffs", |b| b.iter(|| wide.resolve(black_box(0.7342))));

    group.finish();
}

fn bench_process_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_study_block");
    let scale = GradeScale::default();

    let small = make_block(4, 5);
    let medium = make_block(8, 20);
    let large = make_block(20, 100);

    group.bench_function("4_courses_5_items", |b| {
        b.iter(|| process_study_block(black_box(&small), &scale))
    });

    group.bench_function("8_courses_20_items", |b| {
        b.iter(|| process_study_block(black_box(&medium), &scale))
    });

    group.bench_function("20_courses_100_items", |b| {
        b.iter(|| process_study_block(black_box(&large), &scale))
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_process_block);
criterion_main!(benches);
