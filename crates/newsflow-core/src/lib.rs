//! newsflow-core
//!
//! Core building blocks for the NewsFlow portal backend.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（post, category, excerpt, draft, errors）
//! - **ports**: 抽象化レイヤー（PostStore, ImageHost, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（repository, publish, builder）
//! - **impls**: 実装（InMemoryPostStore 開発用、FirebaseStore, ImgbbHost）
//! - **config**: 認証情報の読み込みと placeholder 検出
//!
//! # データフロー
//! publish → ImageHost.upload → PostStore.create → store 側の変更通知 →
//! Subscription (watch channel) → PostRepository → 表示層

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
