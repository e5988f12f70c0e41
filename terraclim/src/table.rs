/*
 * Copyright © 2025, TerraCLIM client contributors. All rights reserved.
 *
 * The “TerraCLIM client” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the tabular representation of API responses (named columns x rows of JSON cell values) and the
//! normalizer that turns JSON objects, arrays and GeoJSON FeatureCollections into such tables

use std::{collections::HashSet, fmt, fs::File, io::Write, path::Path};
use indexmap::IndexSet;
use polars::prelude::*;
use serde_json::{Map, Value, json};
use tracing::{debug, error, warn};

use crate::errors::{Result, validation_error};
use crate::response::{ApiResponse, conversion_error, json_kind};

pub const ERROR_COLUMN: &str = "error";

// temporary columns of left joins
const JOIN_ROW: &str = "__join_row";
const JOIN_KEY: &str = "__join_key";

static NULL: Value = Value::Null;

/* #region table ************************************************************************************/

/// ordered rows x named columns, backed by a polars `DataFrame`. Homogeneous scalar columns get a native
/// dtype (bool, i64, f64, string). Columns with nested values (objects, arrays) or mixed scalar types are
/// stored as compact JSON text and turned back into JSON values on access
#[derive(Debug,Clone)]
pub struct Table {
    df: DataFrame,
    json_columns: IndexSet<String>,
}

impl Default for Table {
    fn default ()->Self {
        Table { df: DataFrame::empty(), json_columns: IndexSet::new() }
    }
}

impl PartialEq for Table {
    fn eq (&self, other: &Self)->bool {
        self.json_columns == other.json_columns && self.df.equals_missing( &other.df)
    }
}

impl Table {
    pub fn empty ()->Self {
        Table::default()
    }

    /// build a table from records. The column set is the union of record keys in first-seen order
    pub fn from_records<I,K> (records: I)->Self where I: IntoIterator<Item=Vec<(K,Value)>>, K: Into<String> {
        let mut builder = TableBuilder::new();
        for rec in records {
            builder.push_record( rec.into_iter().map( |(k,v)| (k.into(), v)));
        }
        builder.build()
    }

    /// a one row table with a single `error` column, which is how we report failures to BI consumers
    pub fn error_table (msg: impl ToString)->Self {
        Table::from_records( vec![ vec![ (ERROR_COLUMN, Value::String( msg.to_string()))]])
    }

    pub fn is_error_table (&self)->bool {
        self.df.width() == 1 && self.has_column( ERROR_COLUMN)
    }

    fn from_frame (columns: Vec<Column>, json_columns: IndexSet<String>)->Self {
        match DataFrame::new( columns) {
            Ok(df) => Table { df, json_columns },
            Err(e) => {
                error!("cannot create table: {}", e);
                Table::empty()
            }
        }
    }

    fn with_frame (&self, df: DataFrame)->Table {
        let json_columns = self.json_columns.iter().filter( |c| df.get_column_index(c).is_some()).cloned().collect();
        Table { df, json_columns }
    }

    pub fn data_frame (&self)->&DataFrame { &self.df }

    pub fn into_data_frame (self)->DataFrame { self.df }

    pub fn columns (&self)->Vec<String> {
        self.df.get_column_names().into_iter().map( |c| c.to_string()).collect()
    }

    pub fn n_rows (&self)->usize { self.df.height() }

    pub fn n_columns (&self)->usize { self.df.width() }

    pub fn is_empty (&self)->bool { self.df.height() == 0 }

    pub fn has_column (&self, name: &str)->bool { self.df.get_column_index(name).is_some() }

    pub fn column_index (&self, name: &str)->Option<usize> { self.df.get_column_index(name) }

    /// the JSON value of a cell, `None` if there is no such row or column
    pub fn get (&self, row: usize, column: &str)->Option<Value> {
        let col = self.df.column( column).ok()?;
        let av = col.get( row).ok()?;
        Some( self.cell_value( column, av))
    }

    pub fn column (&self, name: &str)->Option<Vec<Value>> {
        let col = self.df.column( name).ok()?;
        Some( (0..col.len()).map( |i| col.get(i).map( |av| self.cell_value( name, av)).unwrap_or(Value::Null)).collect())
    }

    pub fn row (&self, row: usize)->Option<Vec<Value>> {
        if row < self.df.height() {
            Some( self.df.get_columns().iter().map( |col| {
                col.get(row).map( |av| self.cell_value( col.name().as_str(), av)).unwrap_or(Value::Null)
            }).collect())
        } else {
            None
        }
    }

    /// the row as a JSON object with keys in column order
    pub fn record (&self, row: usize)->Option<Map<String,Value>> {
        let values = self.row( row)?;
        Some( self.columns().into_iter().zip( values).collect())
    }

    fn cell_value (&self, column: &str, av: AnyValue<'_>)->Value {
        match av {
            AnyValue::Null => Value::Null,
            AnyValue::Boolean(b) => Value::Bool(b),
            AnyValue::Int64(i) => json!(i),
            AnyValue::Float64(x) => json!(x),
            AnyValue::String(s) => self.text_value( column, s),
            AnyValue::StringOwned(s) => self.text_value( column, s.as_str()),
            other => Value::String( other.to_string())
        }
    }

    fn text_value (&self, column: &str, s: &str)->Value {
        if self.json_columns.contains( column) {
            serde_json::from_str( s).unwrap_or_else( |_| Value::String( s.to_string()))
        } else {
            Value::String( s.to_string())
        }
    }

    /// first `n` rows
    pub fn head (&self, n: usize)->Table {
        Table { df: self.df.head( Some(n)), json_columns: self.json_columns.clone() }
    }

    /// new table with the given columns in the given order
    pub fn select (&self, names: &[&str])->Result<Table> {
        self.require( names)?;
        let df = self.df.select( names.iter().copied())?;
        Ok( self.with_frame( df))
    }

    /// check that we got data and all `required` columns are present
    pub fn validate (&self, required: &[&str])->Result<()> {
        if self.is_empty() {
            return Err( validation_error("No data returned from API"))
        }
        let missing: Vec<&str> = required.iter().filter( |c| !self.has_column(c)).copied().collect();
        if !missing.is_empty() {
            return Err( validation_error( format!("Missing required columns: {}", missing.join(", "))))
        }
        Ok(())
    }

    /// returns false if there is no such column or `to` already exists
    pub fn rename_column (&mut self, from: &str, to: &str)->bool {
        if !self.has_column( from) || self.has_column( to) {
            return false
        }
        if self.df.rename( from, to.into()).is_err() {
            return false
        }
        if self.json_columns.shift_remove( from) {
            self.json_columns.insert( to.to_string());
        }
        true
    }

    /// returns false if there is no such column
    pub fn drop_column (&mut self, name: &str)->bool {
        if self.df.drop_in_place( name).is_ok() {
            self.json_columns.shift_remove( name);
            true
        } else {
            false
        }
    }

    /// move the existing columns of `first` to the front (in that order), keep the remaining ones as they are
    pub fn reorder_first (&mut self, first: &[&str]) {
        let mut order: IndexSet<String> = first.iter().filter( |c| self.has_column(c)).map( |c| c.to_string()).collect();
        order.extend( self.columns());

        match self.df.select( order) {
            Ok(df) => self.df = df,
            Err(e) => warn!("cannot reorder columns: {}", e)
        }
    }

    /// left join: every row of `self` is kept (in order) and extended by the columns of the first `right` row
    /// whose `right_on` value matches our `left_on` value. Values are compared in their string form, the
    /// `right_on` column itself is not added. Name clashes get a "_right" suffix
    pub fn left_join (&self, right: &Table, left_on: &str, right_on: &str)->Result<Table> {
        self.require( &[left_on])?;
        right.require( &[right_on])?;

        let mut left = self.df.clone();
        left.with_column( Series::new( JOIN_KEY.into(), self.key_strings( left_on)))?;
        let left = left.with_row_index( JOIN_ROW.into(), None)?;

        let mut seen: HashSet<String> = HashSet::new();
        let right_keys = right.key_strings( right_on);
        let first_match: Vec<bool> = right_keys.iter().map( |k| match k {
            Some(k) => seen.insert( k.clone()),
            None => false
        }).collect();
        let right_keys: Vec<Option<String>> = right_keys.into_iter().zip( first_match.iter()).filter( |(_,m)| **m).map( |(k,_)| k).collect();

        let mut rhs = right.df.filter( &BooleanChunked::new( "first_match".into(), first_match))?;
        rhs.drop_in_place( right_on)?;
        rhs.with_column( Series::new( JOIN_KEY.into(), right_keys))?;

        let mut df = left.left_join( &rhs, [JOIN_KEY], [JOIN_KEY])?
            .sort( [JOIN_ROW], SortMultipleOptions::default())?;
        df.drop_in_place( JOIN_ROW)?;
        df.drop_in_place( JOIN_KEY)?;

        let mut json_columns = self.json_columns.clone();
        for c in right.json_columns.iter().filter( |c| c.as_str() != right_on) {
            if self.has_column(c) { json_columns.insert( format!("{c}_right")); } else { json_columns.insert( c.clone()); }
        }

        Ok( Table { df, json_columns })
    }

    fn require (&self, names: &[&str])->Result<()> {
        match names.iter().find( |n| !self.has_column(n)) {
            Some(n) => Err( validation_error( format!("no column '{n}'"))),
            None => Ok(())
        }
    }

    fn key_strings (&self, column: &str)->Vec<Option<String>> {
        self.column( column).unwrap_or_default().iter().map( |v| match v {
            Value::Null => None,
            v => Some( key_string(v))
        }).collect()
    }

    /* #region CSV */

    pub fn write_csv (&self, path: impl AsRef<Path>)->Result<()> {
        let file = File::create( path.as_ref())?;
        self.write_csv_to( file)?;
        debug!("wrote {} rows to {}", self.n_rows(), path.as_ref().display());
        Ok(())
    }

    /// write header and rows. `Null` cells are empty, nested arrays and objects are compact JSON
    pub fn write_csv_to<W: Write> (&self, w: W)->Result<()> {
        let mut df = self.df.clone();
        CsvWriter::new( w).finish( &mut df)?;
        Ok(())
    }

    pub fn to_csv_string (&self)->Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        self.write_csv_to( &mut buf)?;
        Ok( String::from_utf8_lossy(&buf).into_owned())
    }

    /* #endregion CSV */
}

/// textual representation of a scalar cell, used for text columns of mixed type and join keys
pub fn cell_string (v: &Value)->String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string() // numbers, bools and compact JSON for nested values
    }
}

fn key_string (v: &Value)->String {
    match v {
        // 12.0 and 12 should match
        Value::Number(n) if n.is_f64() => {
            let x = n.as_f64().unwrap_or(f64::NAN);
            if x.fract() == 0.0 && x.abs() < 1e15 { format!("{}", x as i64) } else { n.to_string() }
        }
        other => cell_string(other)
    }
}

impl fmt::Display for Table {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        if self.df.width() == 0 {
            write!(f, "<empty table>")
        } else {
            write!(f, "{}", self.df)
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
enum CellKind { Bool, Int, Float, Text, Mixed, Json }

/// the storage kind of a column, determined from its non-null values
fn column_kind (cells: &[&Value])->CellKind {
    let mut kind: Option<CellKind> = None;
    for v in cells {
        let k = match v {
            Value::Null => continue,
            Value::Bool(_) => CellKind::Bool,
            Value::Number(n) => if n.as_i64().is_some() { CellKind::Int } else { CellKind::Float },
            Value::String(_) => CellKind::Text,
            Value::Array(_) | Value::Object(_) => return CellKind::Json,
        };
        kind = Some( match (kind, k) {
            (None, k) => k,
            (Some(a), b) if a == b => a,
            (Some(CellKind::Int), CellKind::Float) | (Some(CellKind::Float), CellKind::Int) => CellKind::Float,
            _ => CellKind::Mixed
        });
    }
    kind.unwrap_or( CellKind::Text)
}

fn column_series (name: &str, kind: CellKind, cells: &[&Value])->Series {
    let name: PlSmallStr = name.into();
    match kind {
        CellKind::Bool => Series::new( name, cells.iter().map( |v| v.as_bool()).collect::<Vec<Option<bool>>>()),
        CellKind::Int => Series::new( name, cells.iter().map( |v| v.as_i64()).collect::<Vec<Option<i64>>>()),
        CellKind::Float => Series::new( name, cells.iter().map( |v| v.as_f64()).collect::<Vec<Option<f64>>>()),
        CellKind::Text | CellKind::Mixed => {
            Series::new( name, cells.iter().map( |v| if v.is_null() { None } else { Some( cell_string(v)) }).collect::<Vec<Option<String>>>())
        }
        CellKind::Json => {
            Series::new( name, cells.iter().map( |v| if v.is_null() { None } else { Some( v.to_string()) }).collect::<Vec<Option<String>>>())
        }
    }
}

/// accumulates records with possibly different key sets
struct TableBuilder {
    columns: IndexSet<String>,
    rows: Vec<Vec<Value>>,
}

impl TableBuilder {
    fn new ()->Self {
        TableBuilder { columns: IndexSet::new(), rows: Vec::new() }
    }

    fn push_record<I> (&mut self, rec: I) where I: IntoIterator<Item=(String,Value)> {
        let mut row: Vec<Value> = vec![Value::Null; self.columns.len()];
        for (k,v) in rec {
            let (idx,_) = self.columns.insert_full(k);
            if idx >= row.len() { row.resize( idx+1, Value::Null) }
            row[idx] = v;
        }
        self.rows.push(row);
    }

    fn build (self)->Table {
        let mut json_columns: IndexSet<String> = IndexSet::new();
        let mut columns: Vec<Column> = Vec::with_capacity( self.columns.len());

        for (i,name) in self.columns.iter().enumerate() {
            let cells: Vec<&Value> = self.rows.iter().map( |r| r.get(i).unwrap_or(&NULL)).collect();
            let kind = column_kind( &cells);
            if kind == CellKind::Json {
                json_columns.insert( name.clone());
            }
            columns.push( Column::from( column_series( name, kind, &cells)));
        }

        Table::from_frame( columns, json_columns)
    }
}

/* #endregion table */

/* #region normalizer *******************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum NormalizeMode {
    /// nested objects become single cell values
    Plain,
    /// nested objects become dotted path columns ("a.b.c")
    Flatten,
}

/// convert a JSON response payload into a table. This never fails: conversion errors are logged
/// together with the offending input and result in an empty table
pub fn normalize (value: &Value, mode: NormalizeMode)->Table {
    match try_normalize( value, mode) {
        Ok(table) => table,
        Err(e) => {
            error!("error converting {} response into table: {}, input: {}", json_kind(value), e, value);
            Table::empty()
        }
    }
}

/// the fallible version of [`normalize`]
pub fn try_normalize (value: &Value, mode: NormalizeMode)->Result<Table> {
    let mut builder = TableBuilder::new();

    match ApiResponse::classify(value)? {
        ApiResponse::Empty => {}
        ApiResponse::Object(map) => {
            builder.push_record( record_of( map, mode));
        }
        ApiResponse::Array(elems) => {
            for (i,e) in elems.iter().enumerate() {
                match e {
                    Value::Object(map) => builder.push_record( record_of( map, mode)),
                    other => return Err( conversion_error( format!("array element {i} is {}", json_kind(other))))
                }
            }
        }
        ApiResponse::FeatureCollection(features) => {
            for (i,f) in features.iter().enumerate() {
                match f {
                    Value::Object(feature) => builder.push_record( feature_record( feature, mode)),
                    other => return Err( conversion_error( format!("feature {i} is {}", json_kind(other))))
                }
            }
        }
    }

    Ok( builder.build())
}

fn record_of (map: &Map<String,Value>, mode: NormalizeMode)->Vec<(String,Value)> {
    match mode {
        NormalizeMode::Plain => map.iter().map( |(k,v)| (k.clone(), v.clone())).collect(),
        NormalizeMode::Flatten => {
            let mut rec = Vec::with_capacity( map.len());
            flatten_into( None, map, &mut rec);
            rec
        }
    }
}

/// `id`, `type`, `geometry` followed by the feature properties. Properties with a fixed column name
/// replace the value of that column
fn feature_record (feature: &Map<String,Value>, mode: NormalizeMode)->Vec<(String,Value)> {
    let mut rec: Map<String,Value> = Map::new(); // insertion ordered, replacing keeps the position
    for key in ["id", "type", "geometry"] {
        rec.insert( key.to_string(), feature.get(key).cloned().unwrap_or(Value::Null));
    }

    if let Some(Value::Object(props)) = feature.get("properties") {
        for (k,v) in record_of( props, mode) {
            rec.insert( k, v);
        }
    }

    rec.into_iter().collect()
}

/// nested objects are expanded into dotted path keys, everything else (including arrays) is a leaf.
/// Empty nested objects do not produce a column
fn flatten_into (prefix: Option<&str>, map: &Map<String,Value>, rec: &mut Vec<(String,Value)>) {
    for (k,v) in map {
        let key = match prefix {
            Some(p) => format!("{p}.{k}"),
            None => k.clone()
        };
        match v {
            Value::Object(nested) => flatten_into( Some(&key), nested, rec),
            leaf => rec.push( (key, leaf.clone()))
        }
    }
}

/* #endregion normalizer */
