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
#![allow(unused)]

mod common;

use serde_json::json;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::{method, path, query_param, header}};
use terraclim::*;
use terraclim::response::HTML_RESPONSE_MSG;
use common::*;

// run with "cargo test --test test_resources -- --nocapture"

async fn mock_get (server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given( method("GET"))
        .and( path( endpoint))
        .and( header( "authorization", "Bearer AAA"))
        .respond_with( response)
        .mount( server)
        .await;
}

async fn started_server ()->MockServer {
    let server = MockServer::start().await;
    mount_token_endpoint( &server).await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_farms() {
    let server = started_server().await;
    mock_get( &server, "/api/v0/farms/", ResponseTemplate::new(200).set_body_json( json!([
        {"id": 12, "farm_name": "Rietvlei", "farmer_name": "A"},
        {"id": 15, "farm_name": "Doornkop", "farmer_name": "B"}
    ]))).await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        Farms::new( &session)?.get_farms()
    }).await.unwrap();

    assert_eq!( table.columns(), &["id", "farm_name", "farmer_name"]);
    assert_eq!( table.n_rows(), 2);
    assert_eq!( table.get(1, "farm_name"), Some(json!("Doornkop")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_farm_statistics() {
    let server = started_server().await;
    Mock::given( method("GET"))
        .and( path("/api/v0/farms/12/statistics/"))
        .and( query_param( "start_date", "2025-01-01T00:00:00"))
        .and( query_param( "end_date", "2025-01-31T12:30:00"))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!({
            "farm_id": 12, "ndvi": {"mean": 0.61, "max": 0.8}
        })))
        .expect(1)
        .mount( &server)
        .await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        Farms::new( &session)?.get_farm_statistics( 12, Some("2025-01-01"), Some("2025-01-31 12:30:00"))
    }).await.unwrap();

    assert_eq!( table.n_rows(), 1);
    assert_eq!( table.get(0, "ndvi.mean"), Some(json!(0.61)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fields_query() {
    let server = started_server().await;
    Mock::given( method("GET"))
        .and( path("/api/v0/fields/"))
        .and( query_param( "farm_id", "12"))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!([{"field_id": 3, "farm": 12}])))
        .expect(1)
        .mount( &server)
        .await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        Fields::new( &session)?.get_fields( Some(12), None)
    }).await.unwrap();

    assert_eq!( table.get(0, "field_id"), Some(json!(3)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_api_error_detail() {
    let server = started_server().await;
    mock_get( &server, "/api/v0/fields/99/", ResponseTemplate::new(404).set_body_json( json!({"detail": "Not found."}))).await;

    let uri = server.uri();
    let res = blocking( move || {
        let session = login( &uri);
        Fields::new( &session)?.get_field( 99)
    }).await;

    assert_eq!( res, Err( TerraClimError::ApiError("Not found.".to_string())));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_html_response() {
    let server = started_server().await;
    mock_get( &server, "/api/v0/cropType/", ResponseTemplate::new(200).set_body_raw( "<html><body>login</body></html>", "text/html")).await;

    let uri = server.uri();
    let res = blocking( move || {
        let session = login( &uri);
        CropType::new( &session)?.get_crop_types()
    }).await;

    assert_eq!( res, Err( TerraClimError::ApiError( HTML_RESPONSE_MSG.to_string())));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_authenticated() {
    let server = MockServer::start().await;
    Mock::given( method("GET"))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!([])))
        .expect(0)
        .mount( &server)
        .await;

    let uri = server.uri();
    let res = blocking( move || {
        let session = Session::live( test_config( &uri)).unwrap();
        Farms::new( &session).map( |_| ())
    }).await;

    assert_eq!( res, Err( TerraClimError::NotAuthenticated));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_farm_portions() {
    let server = started_server().await;
    Mock::given( method("GET"))
        .and( path("/api/v0/farms/portions/"))
        .and( query_param( "extent", "[2086038.5, -4033790.25, 2112561.75, -4007477.0]"))
        .and( query_param( "farm_id", "12"))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "id": 1,
                  "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]},
                  "properties": {"farm_portion_id": 101, "portion_name": "north"} },
                { "type": "Feature", "id": 2,
                  "geometry": {"type": "Polygon", "coordinates": [[[1,1],[2,1],[2,2],[1,1]]]},
                  "properties": {"farm_portion_id": 102, "portion_name": "south"} }
            ]
        })))
        .expect(1)
        .mount( &server)
        .await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        let extent = Extent::new( 2086038.5, -4033790.25, 2112561.75, -4007477.0)?;
        FarmPortions::new( &session)?.get_farm_portions( &extent, Some(12))
    }).await.unwrap();

    assert_eq!( table.columns(), &["id", "type", "geometry", "farm_portion_id", "portion_name"]);
    assert_eq!( table.n_rows(), 2);
    assert_eq!( table.get(1, "farm_portion_id"), Some(json!(102)));
    assert_eq!( table.get(0, "geometry").and_then( |g| g.get("type").cloned()), Some(json!("Polygon")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_farm_portions_not_geojson() {
    let server = started_server().await;
    mock_get( &server, "/api/v0/farms/portions/", ResponseTemplate::new(200).set_body_json( json!([{"farm_portion_id": 101}]))).await;

    let uri = server.uri();
    let res = blocking( move || {
        let session = login( &uri);
        let extent = Extent::new( 0.0, 0.0, 1.0, 1.0)?;
        FarmPortions::new( &session)?.get_farm_portions( &extent, None)
    }).await;

    assert_eq!( res, Err( TerraClimError::ApiError("Invalid response format: Expected GeoJSON FeatureCollection".to_string())));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_overview_stats() {
    let server = started_server().await;
    Mock::given( method("GET"))
        .and( path("/api/v0/overview-stats/"))
        .and( query_param( "fieldID", "3"))
        .and( query_param( "farm_id", "12"))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!({"total_area_ha": 42.5, "n_fields": 3})))
        .expect(1)
        .mount( &server)
        .await;

    let uri = server.uri();
    let (table, missing_ids) = blocking( move || {
        let session = login( &uri);
        let stats = OverviewStats::new( &session).unwrap();
        (stats.get_overview_stats( Some(12), Some(3)), stats.get_overview_stats( None, None))
    }).await;

    assert_eq!( table.unwrap().get(0, "n_fields"), Some(json!(3)));
    assert!( matches!( missing_ids, Err(TerraClimError::InvalidArgument(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_analysis_stats() {
    let server = started_server().await;
    Mock::given( method("GET"))
        .and( path("/api/v0/analysis-stats/"))
        .and( query_param( "start_date", "2025-01-01T00:00:00"))
        .and( query_param( "end_date", "2025-03-01T00:00:00"))
        .and( query_param( "field_id", "1,2,3"))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!([
            {"field_id": 1, "rain": {"total_mm": 112.4}}
        ])))
        .expect(1)
        .mount( &server)
        .await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        AnalysisStats::new( &session)?.get_analysis_stats( Some("2025-01-01"), Some("2025-03-01"), &[1, 2, 3])
    }).await.unwrap();

    assert_eq!( table.get(0, "rain.total_mm"), Some(json!(112.4)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_climate_wms() {
    let server = started_server().await;
    Mock::given( method("GET"))
        .and( path("/api/v0/geoserver/climate/wms"))
        .and( query_param( "request", "GetMap"))
        .and( query_param( "layers", "rainfall"))
        .and( query_param( "time", "2025-02-01T00:00:00"))
        .respond_with( ResponseTemplate::new(200).set_body_raw( vec![0x89u8, b'P', b'N', b'G', 0, 0, 0, 0], "image/png"))
        .expect(1)
        .mount( &server)
        .await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        let req = WmsMapRequest {
            date: Some("2025-02-01".to_string()),
            variable: Some("rainfall".to_string()),
            bbox: Some("16.0,-35.0,33.0,-22.0".to_string()),
            width: Some(800),
            height: Some(600),
        };
        GeoServerClimate::new( &session)?.get_climate_wms( &req)
    }).await.unwrap();

    assert_eq!( table.n_rows(), 1);
    assert_eq!( table.get(0, "content_type"), Some(json!("image/png")));
    assert_eq!( table.get(0, "content_length"), Some(json!("8")));
    assert_eq!( table.get(0, "width"), Some(json!(800)));
    assert_eq!( table.get(0, "variable"), Some(json!("rainfall")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wms_capabilities() {
    let server = started_server().await;
    Mock::given( method("GET"))
        .and( path("/api/v0/geoserver/climate/wms"))
        .and( query_param( "request", "GetCapabilities"))
        .respond_with( ResponseTemplate::new(200).set_body_raw( "<WMS_Capabilities version=\"1.3.0\"/>", "text/xml"))
        .mount( &server)
        .await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        GeoServerClimate::new( &session)?.get_capabilities()
    }).await.unwrap();

    assert_eq!( table.get(0, "raw_content"), Some(json!("<WMS_Capabilities version=\"1.3.0\"/>")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_feature_info() {
    let server = started_server().await;
    Mock::given( method("GET"))
        .and( path("/api/v0/geoserver/featureinfo/"))
        .and( query_param( "layers", "terraclim:rainfall"))
        .and( query_param( "query_layers", "terraclim:rainfall"))
        .and( query_param( "x", "10"))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!({
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "id": "rainfall.1", "geometry": null, "properties": {"GRAY_INDEX": 3.5}}]
        })))
        .expect(1)
        .mount( &server)
        .await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        let req = FeatureInfoRequest {
            x: 10, y: 20,
            bbox: "16.0,-35.0,33.0,-22.0".to_string(),
            width: 256, height: 256,
            layers: "terraclim:rainfall".to_string(),
            query_layers: None,
            date: None,
        };
        GeoServerFeature::new( &session)?.get_feature_info( &req)
    }).await.unwrap();

    assert_eq!( table.get(0, "GRAY_INDEX"), Some(json!(3.5)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_geoserver_info_requires_workspace() {
    let server = started_server().await;

    let uri = server.uri();
    let res = blocking( move || {
        let session = login( &uri);
        GeoServerInfo::new( &session)?.get_info( " ")
    }).await;

    assert!( matches!( res, Err(TerraClimError::InvalidArgument(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_save_csv() {
    let server = started_server().await;
    mock_get( &server, "/api/v0/cultivar/", ResponseTemplate::new(200).set_body_json( json!([
        {"id": 1, "name": "Chardonnay", "crop_type": 2},
        {"id": 2, "name": "Pinotage, red", "crop_type": 2}
    ]))).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cultivars.csv");

    let uri = server.uri();
    let csv_path = path.clone();
    blocking( move || {
        let session = login( &uri);
        Cultivar::new( &session)?.get_cultivars( None)?.write_csv( &csv_path)
    }).await.unwrap();

    let content = std::fs::read_to_string( &path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!( lines, vec!["id,name,crop_type", "1,Chardonnay,2", "2,\"Pinotage, red\",2"]);
}

/// GET mock for `endpoint` that has to match all `params` and is expected to be called exactly once
async fn mock_get_once (server: &MockServer, endpoint: &str, params: &[(&str,&str)], body: serde_json::Value) {
    let mut mock = Mock::given( method("GET"))
        .and( path( endpoint))
        .and( header( "authorization", "Bearer AAA"));
    for (k,v) in params {
        mock = mock.and( query_param( *k, *v));
    }
    mock.respond_with( ResponseTemplate::new(200).set_body_json( body))
        .expect(1)
        .mount( server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_irrigation() {
    let server = started_server().await;
    mock_get_once( &server, "/api/v0/irrigation/",
        &[("field_id", "3"), ("start_date", "2025-01-01T00:00:00"), ("end_date", "2025-01-31T00:00:00")],
        json!([{"id": 7, "field": 3, "amount_mm": 12.5}, {"id": 8, "field": 3, "amount_mm": 10}])).await;
    mock_get_once( &server, "/api/v0/irrigation/7/", &[], json!({"id": 7, "field": 3, "amount_mm": 12.5})).await;
    mock_get_once( &server, "/api/v0/irrigation/summary/3/",
        &[("start_date", "2025-01-01T00:00:00"), ("end_date", "2025-02-01T06:00:00")],
        json!({"field_id": 3, "total_mm": 22.5, "n_events": 2})).await;

    let uri = server.uri();
    let (data, record, summary) = blocking( move || {
        let session = login( &uri);
        let irrigation = Irrigation::new( &session).unwrap();
        ( irrigation.get_irrigation_data( Some(3), Some("2025-01-01"), Some("2025-01-31")),
          irrigation.get_irrigation_record( 7),
          irrigation.get_irrigation_summary( 3, Some("2025-01-01"), Some("2025-02-01 06:00:00")) )
    }).await;

    let data = data.unwrap();
    assert_eq!( data.n_rows(), 2);
    assert_eq!( data.column("amount_mm"), Some( vec![json!(12.5), json!(10.0)]));

    let record = record.unwrap();
    assert_eq!( record.n_rows(), 1);
    assert_eq!( record.get(0, "id"), Some(json!(7)));

    let summary = summary.unwrap();
    assert_eq!( summary.get(0, "total_mm"), Some(json!(22.5)));
    assert_eq!( summary.get(0, "n_events"), Some(json!(2)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clone_data() {
    let server = started_server().await;
    mock_get_once( &server, "/api/v0/clone/", &[("model_type", "field"), ("instance_id", "3")],
        json!([{"model_type": "field", "instance_id": 3, "clonable": true}])).await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        CloneClient::new( &session)?.get_clone_data( Some("field"), Some(3))
    }).await.unwrap();

    assert_eq!( table.n_rows(), 1);
    assert_eq!( table.get(0, "clonable"), Some(json!(true)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_climate_filter() {
    let server = started_server().await;
    mock_get_once( &server, "/api/v0/filter-table/climate/",
        &[("field_id", "3"), ("start_date", "2025-01-01T00:00:00"), ("end_date", "2025-01-02T00:00:00"), ("variable", "rainfall")],
        json!([
            {"date": "2025-01-01", "rainfall": {"value": 1.5, "unit": "mm"}},
            {"date": "2025-01-02", "rainfall": {"value": 0.0, "unit": "mm"}}
        ])).await;
    mock_get_once( &server, "/api/v0/filter-table/climate/variables/", &[],
        json!([{"name": "rainfall", "unit": "mm"}, {"name": "tmax", "unit": "C"}])).await;

    let uri = server.uri();
    let (data, variables) = blocking( move || {
        let session = login( &uri);
        let filter = ClimateFilter::new( &session).unwrap();
        ( filter.get_climate_data( Some(3), Some("2025-01-01"), Some("2025-01-02"), Some("rainfall")),
          filter.get_available_variables() )
    }).await;

    let data = data.unwrap();
    assert_eq!( data.n_rows(), 2);
    assert!( data.has_column("rainfall.value"));
    assert_eq!( data.get(0, "rainfall.value"), Some(json!(1.5)));
    assert_eq!( data.get(1, "rainfall.unit"), Some(json!("mm")));

    let variables = variables.unwrap();
    assert_eq!( variables.column("name"), Some( vec![json!("rainfall"), json!("tmax")]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_geoserver_auth_key() {
    let server = started_server().await;
    mock_get_once( &server, "/api/v0/geoserver/authkey", &[], json!({"authkey": "0a1b2c"})).await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        GeoServerAuth::new( &session)?.get_auth_key()
    }).await.unwrap();

    assert_eq!( table.get(0, "authkey"), Some(json!("0a1b2c")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_geoserver_layer_info() {
    let server = started_server().await;
    mock_get_once( &server, "/api/v0/geoserver-info/get_info/rainfall/", &[("workspace", "terraclim")],
        json!({"name": "rainfall", "workspace": "terraclim", "srs": "EPSG:4326"})).await;

    let uri = server.uri();
    let (table, missing_layer) = blocking( move || {
        let session = login( &uri);
        let info = GeoServerInfo::new( &session).unwrap();
        ( info.get_layer_info( "rainfall", "terraclim"), info.get_layer_info( "", "terraclim") )
    }).await;

    assert_eq!( table.unwrap().get(0, "srs"), Some(json!("EPSG:4326")));
    assert!( matches!( missing_layer, Err(TerraClimError::InvalidArgument(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_single_items() {
    let server = started_server().await;
    mock_get_once( &server, "/api/v0/farms/12/", &[], json!({"id": 12, "farm_name": "Rietvlei"})).await;
    mock_get_once( &server, "/api/v0/fields/3/", &[], json!({"field_id": 3, "farm": 12, "area_ha": 4.2})).await;
    mock_get_once( &server, "/api/v0/field-notes/5/", &[], json!({"id": 5, "field": 3, "note": "leaf roll"})).await;
    mock_get_once( &server, "/api/v0/cropType/2/", &[], json!({"id": 2, "name": "Grapes"})).await;

    let uri = server.uri();
    let (farm, field, note, crop_type) = blocking( move || {
        let session = login( &uri);
        ( Farms::new( &session).and_then( |c| c.get_farm( 12)),
          Fields::new( &session).and_then( |c| c.get_field( 3)),
          FieldNotes::new( &session).and_then( |c| c.get_field_note( 5)),
          CropType::new( &session).and_then( |c| c.get_crop_type( 2)) )
    }).await;

    assert_eq!( farm.unwrap().get(0, "farm_name"), Some(json!("Rietvlei")));
    assert_eq!( field.unwrap().get(0, "area_ha"), Some(json!(4.2)));
    assert_eq!( note.unwrap().get(0, "note"), Some(json!("leaf roll")));

    let crop_type = crop_type.unwrap();
    assert_eq!( crop_type.n_rows(), 1);
    assert_eq!( crop_type.get(0, "name"), Some(json!("Grapes")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_field_statistics() {
    let server = started_server().await;
    mock_get_once( &server, "/api/v0/fields/3/statistics/",
        &[("start_date", "2025-01-01T00:00:00"), ("end_date", "2025-01-31T00:00:00")],
        json!({"field_id": 3, "ndvi": {"mean": 0.55, "min": 0.2}})).await;

    let uri = server.uri();
    let table = blocking( move || {
        let session = login( &uri);
        Fields::new( &session)?.get_field_statistics( 3, Some("2025-01-01"), Some("2025-01-31"))
    }).await.unwrap();

    assert_eq!( table.n_rows(), 1);
    assert_eq!( table.get(0, "ndvi.mean"), Some(json!(0.55)));
    assert_eq!( table.get(0, "ndvi.min"), Some(json!(0.2)));
}
