//! 缓存系统集成测试
//!
//! 覆盖 (地址 × 语言) 两级缓存的身份、持久化与失效语义

use std::sync::Arc;

use transcriber::{Address, TranscribeError};

mod common {
    include!("common/mod.rs");
}

use common::{bilingual_registry, TestEnvironment};

/// 单行地址返回剥去终止符并翻译后的该行内容
#[test]
fn test_single_line_is_translated_and_stripped() {
    let env = TestEnvironment::new();
    env.write_source("en", &["a colour line", "another line"]);

    let registry = bilingual_registry();
    let mut transcriber = env.transcriber(registry.find("en").unwrap());

    let text = transcriber.get(Address::line(0)).unwrap();
    assert_eq!(text, "a color line", "Whole-word substitution should apply");
    assert!(!text.ends_with('\n'), "Trailing terminator must be stripped");
}

/// 区间取行拼接，恰好剥去一个结尾终止符
#[test]
fn test_range_concatenation_strips_exactly_one_terminator() {
    let env = TestEnvironment::new();
    env.write_source("sv", &["rad ett", "rad två", "rad tre"]);

    let registry = bilingual_registry();
    let mut transcriber = env.transcriber(registry.find("sv").unwrap());

    assert_eq!(
        transcriber.get(Address::range(0, Some(3))).unwrap(),
        "rad ett\nrad två\nrad tre"
    );
    // 空区间合法且为空
    assert_eq!(transcriber.get(Address::range(1, Some(1))).unwrap(), "");
}

/// 等价拼写共享同一个缓存条目
#[test]
fn test_equivalent_addresses_share_cache_identity() {
    let env = TestEnvironment::new();
    env.write_source("en", &["zero", "one", "two"]);

    let registry = bilingual_registry();
    let mut transcriber = env.transcriber(registry.find("en").unwrap());

    transcriber.get(Address::range(1, None)).unwrap();
    transcriber.get(Address::range(1, Some(2))).unwrap();
    transcriber.get(Address::line(1)).unwrap();

    assert_eq!(transcriber.unit_count(), 1, "Three spellings, one unit");

    let stats = transcriber.stats();
    assert_eq!(stats.cache_misses, 1);
    assert_eq!(stats.cache_hits, 2);
    assert_eq!(stats.loads, 1, "Only the first spelling should load");
}

/// 语言 A → B → A：A 的地址只在第一次装载时可解析，
/// 第二次访问 A 仍须由缓存作答
#[test]
fn test_language_roundtrip_survives_source_loss() {
    let env = TestEnvironment::new();
    env.write_source("sv", &["hej världen", "andra raden"]);
    env.write_source("en", &["hello world"]);

    let registry = bilingual_registry();
    let sv = registry.find("sv").unwrap();
    let en = registry.find("en").unwrap();

    let mut transcriber = env.transcriber(Arc::clone(&sv));
    assert_eq!(transcriber.get(Address::line(1)).unwrap(), "andra raden");

    // 瑞典语源被截空：地址 1 从此无法从缓冲解析，只有缓存能作答
    env.write_source("sv", &[]);

    transcriber.set_language(Arc::clone(&en)).unwrap();
    assert_eq!(transcriber.get(Address::line(0)).unwrap(), "hello world");

    transcriber.set_language(sv).unwrap();
    assert_eq!(
        transcriber.get(Address::line(1)).unwrap(),
        "andra raden",
        "Second visit must be answered from cache, not the buffer"
    );

    // 反证：同一缓冲下未缓存的地址确实解析不了
    assert!(matches!(
        transcriber.get(Address::line(0)).unwrap_err(),
        TranscribeError::OutOfRange { .. }
    ));
}

/// 源文件被删除时切换失败，但其他语言的缓存不受影响
#[test]
fn test_failed_switch_keeps_foreign_cache() {
    let env = TestEnvironment::new();
    env.write_source("sv", &["hej världen"]);
    env.write_source("en", &["hello world"]);

    let registry = bilingual_registry();
    let sv = registry.find("sv").unwrap();
    let en = registry.find("en").unwrap();

    let mut transcriber = env.transcriber(Arc::clone(&sv));
    transcriber.get(Address::line(0)).unwrap();

    env.remove_source("en");
    let err = transcriber.set_language(en).unwrap_err();
    assert_eq!(
        err,
        TranscribeError::SourceNotFound {
            path: env.source_path("en")
        }
    );

    // 切换失败不动条目表
    let unit = transcriber.unit(Address::line(0)).unwrap();
    assert!(unit.is_loaded_for("sv"));
    assert_eq!(unit.text_for("sv").unwrap(), "hej världen");
}

/// 语言 A → B → A 的完整热切换：第二次访问 A 不触发重载
#[test]
fn test_language_roundtrip_reuses_cached_text() {
    let env = TestEnvironment::new();
    env.write_source("sv", &["hej"]);
    env.write_source("en", &["hello"]);

    let registry = bilingual_registry();
    let sv = registry.find("sv").unwrap();
    let en = registry.find("en").unwrap();

    let mut transcriber = env.transcriber(Arc::clone(&sv));
    transcriber.get(Address::line(0)).unwrap();

    transcriber.set_language(en).unwrap();
    transcriber.get(Address::line(0)).unwrap();

    transcriber.set_language(sv).unwrap();
    assert_eq!(transcriber.get(Address::line(0)).unwrap(), "hej");

    let unit = transcriber.unit(Address::line(0)).unwrap();
    assert_eq!(unit.load_count(), 2, "Second visit to sv must be a cache hit");
}

/// 换语言失败后缓冲未填充，查询报 NotReady
#[test]
fn test_get_without_populated_buffer_fails() {
    let env = TestEnvironment::new();
    env.write_source("sv", &["hej"]);

    let registry = bilingual_registry();
    let mut transcriber = env.transcriber(registry.find("sv").unwrap());

    // 目标语言的源不存在：切换失败，旧缓冲已被丢弃
    let err = transcriber
        .set_language(registry.find("en").unwrap())
        .unwrap_err();
    assert!(matches!(err, TranscribeError::SourceNotFound { .. }));

    assert_eq!(
        transcriber.get(Address::line(0)).unwrap_err(),
        TranscribeError::NotReady
    );
}

/// 越界地址报 OutOfRange 并给出有效范围
#[test]
fn test_one_past_end_cites_bounds() {
    let env = TestEnvironment::new();
    env.write_source("en", &["zero", "one", "two"]);

    let registry = bilingual_registry();
    let mut transcriber = env.transcriber(registry.find("en").unwrap());

    let err = transcriber.get(Address::line(3)).unwrap_err();
    assert_eq!(
        err,
        TranscribeError::OutOfRange {
            index: 3,
            bounds: (0, 2)
        }
    );
}

/// 软失效强制下一次 get 重新加载；期间直接 text_for 报 NotLoaded
#[test]
fn test_soft_eviction_forces_reload() {
    let env = TestEnvironment::new();
    env.write_source("en", &["a colour line"]);

    let registry = bilingual_registry();
    let mut transcriber = env.transcriber(registry.find("en").unwrap());

    transcriber.get(Address::line(0)).unwrap();
    assert!(transcriber.evict(Address::line(0), "en"));

    // 失效窗口内绕过 get 直接读条目必须失败
    let unit = transcriber.unit(Address::line(0)).unwrap();
    assert!(matches!(
        unit.text_for("en"),
        Err(TranscribeError::NotLoaded { .. })
    ));

    // 源在磁盘上变了：重载后看到新内容，证明真的重新走了加载路径
    env.write_source("en", &["a fresh colour line"]);
    transcriber.set_language(registry.find("en").unwrap()).unwrap();
    assert_eq!(
        transcriber.get(Address::line(0)).unwrap(),
        "a fresh color line"
    );
    assert_eq!(transcriber.unit(Address::line(0)).unwrap().load_count(), 2);
}

/// reset 清空条目并强制从磁盘重建；set_language 从不清条目
#[test]
fn test_reset_versus_set_language() {
    let env = TestEnvironment::new();
    env.write_source("sv", &["hej"]);
    env.write_source("en", &["hello"]);

    let registry = bilingual_registry();
    let mut transcriber = env.transcriber(registry.find("sv").unwrap());

    transcriber.get(Address::line(0)).unwrap();
    transcriber.set_language(registry.find("en").unwrap()).unwrap();
    transcriber.get(Address::line(0)).unwrap();

    // 热切换积累条目而不清空
    assert_eq!(transcriber.unit_count(), 1);
    assert!(transcriber.unit(Address::line(0)).unwrap().is_loaded_for("sv"));

    transcriber.reset();
    assert_eq!(transcriber.unit_count(), 0);

    // reset 后缓冲也没了：先装载才能继续
    assert_eq!(
        transcriber.get(Address::line(0)).unwrap_err(),
        TranscribeError::NotReady
    );
    transcriber.set_language(registry.find("en").unwrap()).unwrap();
    assert_eq!(transcriber.get(Address::line(0)).unwrap(), "hello");
    assert_eq!(
        transcriber.unit(Address::line(0)).unwrap().load_count(),
        1,
        "Rebuild starts from a fresh unit"
    );
}

/// 语言侧的记账集合只观测，不影响缓存
#[test]
fn test_language_bookkeeping_observes_loads() {
    let env = TestEnvironment::new();
    env.write_source("en", &["zero", "one", "two", "three"]);

    let registry = bilingual_registry();
    let en = registry.find("en").unwrap();
    let mut transcriber = env.transcriber(Arc::clone(&en));

    transcriber.get(Address::line(0)).unwrap();
    transcriber.get(Address::range(1, Some(3))).unwrap();
    transcriber.get(Address::line(0)).unwrap();

    assert_eq!(en.loaded_unit_count(), 2);
    assert_eq!(transcriber.unit_count(), 2);
}
